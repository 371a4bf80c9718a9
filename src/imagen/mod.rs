mod client;
mod types;

pub use client::{ImageClient, ImagenClient};
#[cfg(test)]
pub use client::MockImageClient;
pub use types::{
    DATA_URI_PREFIX, Instance, Parameters, PredictRequest, PredictResponse, Prediction,
    UpstreamError,
};
