//! Lock-free circular buffer for PCM samples

use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::HeapRb;

/// Lock-free circular buffer for i16 PCM samples.
///
/// Uses `ringbuf` for wait-free single-producer single-consumer operations:
/// the audio callback (producer) and the session loop (consumer) never block
/// each other.
pub struct CircularBuffer {
    producer: ringbuf::HeapProd<i16>,
    consumer: ringbuf::HeapCons<i16>,
    capacity: usize,
}

impl CircularBuffer {
    /// Create a new circular buffer holding up to `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let rb = HeapRb::<i16>::new(capacity);
        let (producer, consumer) = rb.split();

        Self {
            producer,
            consumer,
            capacity,
        }
    }

    /// Write samples (producer side, called from the audio callback).
    ///
    /// Returns the number of samples actually written; when the buffer is
    /// full the excess is dropped, never an error.
    pub fn write(&mut self, samples: &[i16]) -> usize {
        self.producer.push_slice(samples)
    }

    /// Read samples (consumer side). Returns the number of samples actually
    /// read, which may be fewer than requested.
    pub fn read(&mut self, output: &mut [i16]) -> usize {
        self.consumer.pop_slice(output)
    }

    /// Samples currently available for reading
    pub fn available(&self) -> usize {
        self.consumer.occupied_len()
    }

    /// Remaining capacity for writing
    pub fn free_space(&self) -> usize {
        self.producer.vacant_len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.producer.is_full()
    }

    pub fn clear(&mut self) {
        self.consumer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut buffer = CircularBuffer::new(1024);

        let samples = vec![1, 2, 3, 4, 5];
        assert_eq!(buffer.write(&samples), 5);
        assert_eq!(buffer.available(), 5);

        let mut output = vec![0; 5];
        assert_eq!(buffer.read(&mut output), 5);
        assert_eq!(output, samples);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_wrap_around() {
        let mut buffer = CircularBuffer::new(10);

        let samples: Vec<i16> = (0..10).collect();
        assert_eq!(buffer.write(&samples), 10);
        assert!(buffer.is_full());

        let mut output = vec![0; 5];
        assert_eq!(buffer.read(&mut output), 5);

        let more: Vec<i16> = (10..15).collect();
        assert_eq!(buffer.write(&more), 5);
        assert_eq!(buffer.available(), 10);
    }

    #[test]
    fn test_overflow_drops_excess() {
        let mut buffer = CircularBuffer::new(5);

        let samples = vec![7; 10];
        assert_eq!(buffer.write(&samples), 5);
        assert!(buffer.is_full());
        assert_eq!(buffer.free_space(), 0);
    }
}
