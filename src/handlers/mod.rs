use actix_web::web;

pub mod attendance_handlers;
pub mod auth_handlers;
pub mod data_handlers;
pub mod export_handlers;
pub mod member_handlers;
pub mod report_handlers;
pub mod session_handlers;

/// Mount every /api route. Shared with the integration tests so they run
/// against the same route table as the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(data_handlers::health))
            .route("/data", web::get().to(data_handlers::export))
            .route("/data", web::put().to(data_handlers::import))
            // Members
            .route("/members", web::get().to(member_handlers::list))
            .route("/members", web::post().to(member_handlers::create))
            .route("/members/{id}", web::put().to(member_handlers::update))
            .route("/members/{id}", web::delete().to(member_handlers::delete))
            // Sessions
            .route("/sessions", web::get().to(session_handlers::list))
            .route("/sessions", web::post().to(session_handlers::create))
            .route("/sessions/{id}", web::put().to(session_handlers::update))
            .route("/sessions/{id}", web::delete().to(session_handlers::delete))
            // Attendance
            .route(
                "/sessions/{id}/attendance",
                web::get().to(attendance_handlers::roster),
            )
            .route(
                "/sessions/{id}/occupancy",
                web::get().to(attendance_handlers::occupancy),
            )
            .route(
                "/sessions/{id}/register",
                web::post().to(attendance_handlers::register),
            )
            .route(
                "/sessions/{id}/unregister",
                web::post().to(attendance_handlers::unregister),
            )
            .route(
                "/sessions/{id}/attend",
                web::post().to(attendance_handlers::attend),
            )
            .route("/attendance", web::get().to(attendance_handlers::list))
            .route(
                "/attendance/{session_id}/{member_id}",
                web::put().to(attendance_handlers::put_record),
            )
            .route(
                "/attendance/{session_id}/{member_id}",
                web::delete().to(attendance_handlers::remove_record),
            )
            // Reports and export
            .route("/reports", web::get().to(report_handlers::summary))
            .route("/export/{kind}", web::get().to(export_handlers::csv))
            // Auth
            .route("/auth/login", web::post().to(auth_handlers::login))
            .route("/auth/logout", web::post().to(auth_handlers::logout))
            .route("/auth/status", web::get().to(auth_handlers::status)),
    );
}
