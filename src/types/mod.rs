pub mod route;
pub mod trip;
