pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        session_ttl: u64,
        secure_cookies: bool,
    },
}
