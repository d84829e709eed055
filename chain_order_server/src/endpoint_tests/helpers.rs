use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chain_order_engine::db_types::Order;
use chrono::{TimeZone, Utc};
use log::debug;

/// Calls a test service, configured with `configure`, and returns the status code and body of the response.
pub async fn send_request<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let _ = env_logger::try_init();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = res.into_body().try_into_bytes().map(|b| String::from_utf8_lossy(&b).into_owned()).unwrap_or_default();
    (status, body)
}

pub fn sample_order(tx: &str, confirmed: bool) -> Order {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Order {
        id: 1,
        tx: tx.to_string(),
        from: "A".into(),
        to: "B".into(),
        asset: "NEO".into(),
        value: "5".into(),
        created_at,
        confirm_time: confirmed.then_some(created_at),
        block: if confirmed { 100 } else { -1 },
    }
}
