pub mod log_buffer;
pub mod notices;
pub mod poller;
pub mod recorder;
pub mod ring_buffer;
pub mod series;

#[cfg(test)]
pub(crate) mod testing;
