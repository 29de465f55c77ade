pub mod errors;
pub mod db;
pub mod news;

#[cfg(test)]
mod tests;
