pub mod haversine;
pub mod proximity;
