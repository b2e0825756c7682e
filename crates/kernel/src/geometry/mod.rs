pub mod point;
pub mod vector;
pub mod ray;
pub mod plane;
pub mod intersection;
