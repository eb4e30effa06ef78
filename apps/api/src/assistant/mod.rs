// Chat assistant — proxies staff conversations to the LLM through the single
// llm_client. No other module may talk to the LLM API.

pub mod conversation;
pub mod handlers;
