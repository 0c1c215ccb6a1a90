//! Ordered queue of synthesized narration audio
//!
//! Buffers chunks between the session worker and the playback plumbing.
//! Chunks are keyed by turn id; a chunk from a new turn evicts anything
//! left over from the previous one.

use crate::tts::engine::AudioChunk;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AudioQueue {
    /// Queued chunks, ordered by sentence index
    chunks: Arc<Mutex<Vec<AudioChunk>>>,

    /// Next sentence index expected for playback
    next_index: Arc<Mutex<usize>>,

    /// Turn currently being played
    current_turn: Arc<Mutex<Option<Uuid>>>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self {
            chunks: Arc::new(Mutex::new(Vec::new())),
            next_index: Arc::new(Mutex::new(0)),
            current_turn: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a chunk, evicting stale chunks when the turn changes.
    pub fn enqueue(&self, chunk: AudioChunk) {
        let mut chunks = self.chunks.lock();
        let mut current = self.current_turn.lock();

        if current.map(|t| t != chunk.turn_id).unwrap_or(true) {
            chunks.clear();
            *self.next_index.lock() = 0;
            *current = Some(chunk.turn_id);
        }

        let pos = chunks
            .iter()
            .position(|c| c.sentence_index > chunk.sentence_index)
            .unwrap_or(chunks.len());
        chunks.insert(pos, chunk);
    }

    /// Next chunk in sentence order, or None if it has not arrived yet.
    pub fn dequeue(&self) -> Option<AudioChunk> {
        let mut chunks = self.chunks.lock();
        let mut next = self.next_index.lock();

        if let Some(pos) = chunks.iter().position(|c| c.sentence_index == *next) {
            *next += 1;
            Some(chunks.remove(pos))
        } else {
            None
        }
    }

    pub fn clear(&self) {
        self.chunks.lock().clear();
        *self.next_index.lock() = 0;
        *self.current_turn.lock() = None;
    }

    pub fn len(&self) -> usize {
        self.chunks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.lock().is_empty()
    }

    pub fn total_duration_secs(&self) -> f32 {
        self.chunks.lock().iter().map(|c| c.duration_secs()).sum()
    }
}

impl Default for AudioQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, turn_id: Uuid, value: f32) -> AudioChunk {
        AudioChunk {
            samples: vec![value],
            sample_rate: 22050,
            sentence_index: index,
            turn_id,
        }
    }

    #[test]
    fn test_dequeue_in_sentence_order() {
        let queue = AudioQueue::new();
        let turn = Uuid::new_v4();

        queue.enqueue(chunk(2, turn, 2.0));
        queue.enqueue(chunk(0, turn, 0.0));
        queue.enqueue(chunk(1, turn, 1.0));

        assert_eq!(queue.dequeue().unwrap().sentence_index, 0);
        assert_eq!(queue.dequeue().unwrap().sentence_index, 1);
        assert_eq!(queue.dequeue().unwrap().sentence_index, 2);
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_new_turn_evicts_stale_chunks() {
        let queue = AudioQueue::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        queue.enqueue(chunk(0, first, 1.0));
        queue.enqueue(chunk(0, second, 2.0));

        assert_eq!(queue.len(), 1);
        let got = queue.dequeue().unwrap();
        assert_eq!(got.turn_id, second);
    }

    #[test]
    fn test_gap_blocks_dequeue() {
        let queue = AudioQueue::new();
        let turn = Uuid::new_v4();

        queue.enqueue(chunk(1, turn, 1.0));
        // Index 0 has not arrived, so nothing is ready
        assert!(queue.dequeue().is_none());

        queue.enqueue(chunk(0, turn, 0.0));
        assert_eq!(queue.dequeue().unwrap().sentence_index, 0);
        assert_eq!(queue.dequeue().unwrap().sentence_index, 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear() {
        let queue = AudioQueue::new();
        queue.enqueue(chunk(0, Uuid::new_v4(), 1.0));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.total_duration_secs(), 0.0);
    }
}
