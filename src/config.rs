use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub facility_timezone: String, // IANA name, e.g. "Europe/Berlin"
    pub completion_sweep_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set (HS256 signing secret)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.pitch-booking.local".to_string()),
            facility_timezone: env::var("FACILITY_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            completion_sweep_secs: env::var("COMPLETION_SWEEP_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("COMPLETION_SWEEP_SECS must be a number"),
        }
    }
}
