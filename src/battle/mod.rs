pub mod engine;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
