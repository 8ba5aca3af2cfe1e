pub mod client;
pub mod endpoints;

#[cfg(test)]
pub(crate) mod fake;
