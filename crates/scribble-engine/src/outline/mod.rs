pub mod hitzone;
pub mod sample;

#[cfg(feature = "extract")]
pub mod extract;
#[cfg(feature = "extract")]
pub mod job;
#[cfg(feature = "extract")]
pub mod mask;
