pub mod valuations;

pub use valuations::ValuationRepository;
