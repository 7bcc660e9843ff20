pub mod carriers;

pub use carriers::CarrierService;
