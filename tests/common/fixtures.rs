//! Static corpora used across harnesses.
//!
//! Raw service log lines are written the way they appear in
//! `enriched_service_logs.csv`: one CSV cell per line, so payload quotes are
//! doubled and payload lines are wrapped in quotes.

/// Header line of the raw service log file.
pub const RAW_HEADER: &str = "log_line";

/// Raw lines that match the service log grammar.
pub const CORPUS_CONFORMING: &[&str] = &[
    r#""2024-01-15 10:00:01 [INFO] (api-gateway) | IP: 10.0.0.1 | UA: Mozilla/5.0 | Event: GET /api/v1/users | Payload: {""status"": ""200""}""#,
    r#""2024-01-15 10:00:12 [ERROR] (auth-service) | IP: 10.0.0.2 | UA: curl/8.4.0 | Event: POST /auth/login | Payload: {""status"": ""401""}""#,
    r#""2024-01-15 10:00:30 [INFO] (cart-service) | IP: 10.0.0.3 | UA: k6/0.49.0 | Event: GET /api/v1/cart | Payload: {""status"": ""200"", ""data"": {""items"": 4}}""#,
    "2024-01-15 10:00:45 [WARN] (api-gateway) | IP: 10.0.0.4 | UA: k6/0.49.0 | Event: DELETE /api/v1/session - 204",
    r#""2024-01-15 10:01:02 [INFO] (api-gateway) | IP: 10.0.0.1 | UA: Mozilla/5.0 | Event: GET /api/v1/orders | Payload: {""status"": ""200""}""#,
    "2024-01-15 10:01:59 [ERROR] (payment-service) | IP: 10.0.0.5 | UA: Go-http-client/1.1 | Event: POST /api/v1/payments - 502",
];

/// `CORPUS_CONFORMING` after normalization, line for line.
pub const CORPUS_CONFORMING_PREPARED: &[&str] = &[
    "2024-01-15 10:00:01|INFO|api-gateway|10.0.0.1|Mozilla/5.0|GET|api/v1/users|200",
    "2024-01-15 10:00:12|ERROR|auth-service|10.0.0.2|curl/8.4.0|POST|auth/login|401",
    "2024-01-15 10:00:30|INFO|cart-service|10.0.0.3|k6/0.49.0|GET|api/v1/cart|200|4",
    "2024-01-15 10:00:45|WARN|api-gateway|10.0.0.4|k6/0.49.0|DELETE|api/v1/session|204",
    "2024-01-15 10:01:02|INFO|api-gateway|10.0.0.1|Mozilla/5.0|GET|api/v1/orders|200",
    "2024-01-15 10:01:59|ERROR|payment-service|10.0.0.5|Go-http-client/1.1|POST|api/v1/payments|502",
];

/// Raw lines outside the grammar.
pub const CORPUS_MALFORMED: &[&str] = &[
    "2024-01-01 10:00:00 [ERROR] (auth-service) - IP: 1.2.3.4 | UA: curl | Event: login_failed",
    "service restarted",
    "",
];

/// Raw log file text: header plus `lines`.
pub fn raw_log_file(lines: &[&str]) -> String {
    let mut text = String::from(RAW_HEADER);
    text.push('\n');
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Header of the load-test metrics file, with an extra column the loader
/// must ignore.
pub const METRICS_HEADER: &str = "timestamp,rps,cpu_usage,latency_ms,errors_per_minute,active_users";

/// Metrics file text with one row per ten seconds.
pub fn metrics_file(rows: usize) -> String {
    let mut text = String::from(METRICS_HEADER);
    text.push('\n');
    for i in 0..rows {
        text.push_str(&format!(
            "2024-01-15 10:{:02}:{:02},{:.3},{:.3},{:.3},{:.3},{}\n",
            i * 10 / 60,
            i * 10 % 60,
            100.0 + i as f64 * 1.111,
            40.0 + i as f64 * 0.517,
            12.0 + i as f64 * 0.333,
            (i % 3) as f64 * 0.505,
            50 + i,
        ));
    }
    text
}
