pub mod adventures;
pub mod auth;
pub mod badges;
pub mod error;
pub mod extract;
pub mod friends;
pub mod memories;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;
