use crate::{api::attendance, config::Config};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-peer-IP quota. Built once at startup and shared by every worker, so
/// the configured rate is the whole server's budget per client.
pub fn build_limiter(requests_per_min: u32) -> anyhow::Result<Arc<Limiter>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min} per minute"))?;
    Ok(Arc::new(Governor::new(&cfg)))
}

/// Attendance resources, relative to whatever scope mounts them.
pub fn attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(web::resource("").route(web::post().to(attendance::record_attendance)))
            // /attendance/bulk
            .service(
                web::resource("/bulk").route(web::post().to(attendance::record_bulk_attendance)),
            )
            // /attendance/users/{user_id}/summary
            .service(
                web::resource("/users/{user_id}/summary")
                    .route(web::get().to(attendance::monthly_summary)),
            )
            // /attendance/users/{user_id}/history
            .service(
                web::resource("/users/{user_id}/history")
                    .route(web::get().to(attendance::history)),
            )
            // /attendance/{record_id}, registered last so it never shadows /bulk
            .service(
                web::resource("/{record_id}")
                    .route(web::delete().to(attendance::delete_attendance)),
            ),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: Arc<Limiter>) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter) // rate limiting
            .configure(attendance_routes),
    );
}
