//! Remote-control link drivers

pub mod uart;

pub use uart::UartLink;
