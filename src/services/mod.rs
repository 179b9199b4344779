pub mod freshness;
pub mod openweather;
pub mod validation;
pub mod weather;

#[cfg(test)]
pub mod test_support;
