pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{
    activity, assistant, attendance, directory, onboarding, recruitment, reviews, storage, tasks,
    tickets,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api/staff", staff_routes())
        .nest("/api/client", client_routes())
        .nest("/api/admin", admin_routes())
        .with_state(state)
}

fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(directory::handlers::handle_staff_me))
        // Onboarding
        .route(
            "/onboarding",
            get(onboarding::handlers::handle_get_own_onboarding),
        )
        .route(
            "/onboarding/:section",
            put(onboarding::handlers::handle_submit_section),
        )
        // Time & attendance
        .route(
            "/time-entries/clock-in",
            post(attendance::handlers::handle_clock_in),
        )
        .route(
            "/time-entries/clock-out",
            post(attendance::handlers::handle_clock_out),
        )
        .route(
            "/time-entries",
            get(attendance::handlers::handle_list_own_time_entries),
        )
        .route("/breaks/start", post(attendance::handlers::handle_start_break))
        .route(
            "/breaks/active",
            get(attendance::handlers::handle_get_active_break),
        )
        .route(
            "/breaks/:id/pause",
            post(attendance::handlers::handle_pause_break),
        )
        .route(
            "/breaks/:id/resume",
            post(attendance::handlers::handle_resume_break),
        )
        .route("/breaks/:id/end", post(attendance::handlers::handle_end_break))
        // Tasks
        .route("/tasks", get(tasks::handlers::handle_list_staff_tasks))
        .route(
            "/tasks/:id/status",
            patch(tasks::handlers::handle_update_task_status),
        )
        // Reviews (read-only)
        .route("/reviews", get(reviews::handlers::handle_list_staff_reviews))
        // Tickets
        .route(
            "/tickets",
            post(tickets::handlers::handle_staff_create_ticket)
                .get(tickets::handlers::handle_staff_list_tickets),
        )
        .route("/tickets/:id", get(tickets::handlers::handle_staff_get_ticket))
        .route(
            "/tickets/:id/comments",
            post(tickets::handlers::handle_staff_comment_ticket),
        )
        // Activity feed
        .route("/feed", get(activity::handlers::handle_get_feed))
        .route("/posts", post(activity::handlers::handle_create_post))
        .route(
            "/posts/:id",
            get(activity::handlers::handle_get_post)
                .delete(activity::handlers::handle_delete_own_post),
        )
        .route(
            "/posts/:id/likes",
            post(activity::handlers::handle_toggle_like),
        )
        .route(
            "/posts/:id/comments",
            post(activity::handlers::handle_comment_post),
        )
        // Contract
        .route(
            "/contract",
            get(recruitment::handlers::handle_get_own_contract),
        )
        .route(
            "/contract/sign",
            post(recruitment::handlers::handle_sign_contract),
        )
        // Assistant
        .route("/assistant/chat", post(assistant::handlers::handle_chat))
        // Uploads
        .route(
            "/uploads/avatar",
            post(storage::handlers::handle_upload_avatar),
        )
        .route(
            "/uploads/document/:doc_type",
            post(storage::handlers::handle_upload_document),
        )
        .route(
            "/uploads/signature",
            post(storage::handlers::handle_upload_signature),
        )
        .route(
            "/uploads/feed-image",
            post(storage::handlers::handle_upload_feed_image),
        )
        .route(
            "/uploads",
            delete(storage::handlers::handle_delete_own_upload),
        )
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(directory::handlers::handle_client_me))
        // Tasks
        .route(
            "/tasks",
            post(tasks::handlers::handle_create_task)
                .get(tasks::handlers::handle_list_client_tasks),
        )
        .route(
            "/tasks/:id",
            patch(tasks::handlers::handle_update_task)
                .delete(tasks::handlers::handle_delete_task),
        )
        // Reviews
        .route(
            "/reviews",
            post(reviews::handlers::handle_create_review)
                .get(reviews::handlers::handle_list_client_reviews),
        )
        .route(
            "/reviews/:id/submit",
            post(reviews::handlers::handle_submit_review),
        )
        // Tickets
        .route(
            "/tickets",
            post(tickets::handlers::handle_client_create_ticket)
                .get(tickets::handlers::handle_client_list_tickets),
        )
        .route(
            "/tickets/:id",
            get(tickets::handlers::handle_client_get_ticket),
        )
        .route(
            "/tickets/:id/comments",
            post(tickets::handlers::handle_client_comment_ticket),
        )
        // Recruitment
        .route(
            "/interview-requests",
            post(recruitment::handlers::handle_create_interview_request)
                .get(recruitment::handlers::handle_list_client_interviews),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(directory::handlers::handle_admin_me))
        // Companies & clients
        .route(
            "/companies",
            post(directory::handlers::handle_create_company)
                .get(directory::handlers::handle_list_companies),
        )
        .route(
            "/clients",
            post(directory::handlers::handle_create_client)
                .get(directory::handlers::handle_list_clients),
        )
        .route(
            "/clients/:id",
            delete(directory::handlers::handle_delete_client),
        )
        // Staff roster
        .route("/staff", get(directory::handlers::handle_list_staff))
        .route("/staff/:id", get(directory::handlers::handle_get_staff))
        .route(
            "/staff/:id/assignment",
            patch(directory::handlers::handle_update_assignment),
        )
        // Onboarding review
        .route(
            "/onboarding",
            get(onboarding::handlers::handle_list_onboarding),
        )
        .route(
            "/onboarding/:staff_id",
            get(onboarding::handlers::handle_get_staff_onboarding),
        )
        .route(
            "/onboarding/:staff_id/:section/approve",
            post(onboarding::handlers::handle_approve_section),
        )
        .route(
            "/onboarding/:staff_id/:section/reject",
            post(onboarding::handlers::handle_reject_section),
        )
        // Oversight
        .route("/tasks", get(tasks::handlers::handle_admin_list_tasks))
        .route(
            "/reviews",
            get(reviews::handlers::handle_admin_list_reviews),
        )
        .route(
            "/reviews/:id/acknowledge",
            post(reviews::handlers::handle_acknowledge_review),
        )
        .route(
            "/tickets",
            get(tickets::handlers::handle_admin_list_tickets),
        )
        .route(
            "/tickets/:id/status",
            patch(tickets::handlers::handle_admin_update_ticket_status),
        )
        .route(
            "/tickets/:id/comments",
            post(tickets::handlers::handle_admin_comment_ticket),
        )
        .route(
            "/time-entries",
            get(attendance::handlers::handle_admin_list_time_entries),
        )
        // Recruitment
        .route(
            "/candidates",
            get(recruitment::handlers::handle_search_candidates),
        )
        .route(
            "/candidates/:id",
            get(recruitment::handlers::handle_get_candidate),
        )
        .route(
            "/interviews",
            get(recruitment::handlers::handle_admin_list_interviews),
        )
        .route(
            "/interviews/:id/schedule",
            post(recruitment::handlers::handle_schedule_interview),
        )
        .route(
            "/interviews/:id/complete",
            post(recruitment::handlers::handle_complete_interview),
        )
        .route(
            "/interviews/:id/send-offer",
            post(recruitment::handlers::handle_send_offer),
        )
        .route(
            "/interviews/:id/decline-offer",
            post(recruitment::handlers::handle_decline_offer),
        )
        .route(
            "/job-acceptances",
            post(recruitment::handlers::handle_create_job_acceptance),
        )
        .route(
            "/contracts",
            get(recruitment::handlers::handle_admin_list_contracts),
        )
        .route(
            "/contracts/:id/issue",
            post(recruitment::handlers::handle_issue_contract),
        )
        // Moderation
        .route(
            "/posts/:id",
            delete(activity::handlers::handle_admin_delete_post),
        )
        .route(
            "/uploads",
            delete(storage::handlers::handle_admin_delete_upload),
        )
}
