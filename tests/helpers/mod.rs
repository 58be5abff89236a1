pub mod measurement_factory;

pub use measurement_factory::MeasurementFileFactory;
