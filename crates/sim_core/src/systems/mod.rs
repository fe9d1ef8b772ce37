pub mod handle_request;
pub mod pipeline;
pub mod request_arrival;
pub mod sample_capture;
pub mod scale_up;
