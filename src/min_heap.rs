use crate::error::{HuffmanError, Result};

/// Array-backed binary min-heap with a fixed capacity.
///
/// Tree construction never needs more room than the number of leaves it
/// starts with: every round extracts two nodes and inserts one.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T> MinHeap<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }
}

impl<T: Ord> MinHeap<T> {
    /// Bulk-load `source` and heapify it bottom-up in O(n). The capacity is
    /// the length of `source`.
    pub fn build(source: Vec<T>) -> Self {
        let capacity = source.len();
        let mut heap = MinHeap {
            elements: source,
            capacity,
        };
        heap.build_heap();
        heap
    }

    /// Restore the heap invariant over the whole array.
    pub fn build_heap(&mut self) {
        let n = self.len();
        for i in (0..n / 2).rev() {
            self.sift_down(i);
        }
    }

    pub fn valid_min_heap(&self) -> bool {
        (1..self.len()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.len() >= self.capacity {
            return Err(HuffmanError::HeapOverflow(self.capacity));
        }
        self.elements.push(value);
        self.sift_up(self.len() - 1);
        Ok(())
    }

    pub fn extract_min(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(HuffmanError::EmptyQueueAccess);
        }
        let result = self.elements.swap_remove(0);
        self.sift_down(0);
        Ok(result)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[i] >= self.elements[p] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_then_drain_is_sorted() {
        let mut heap = MinHeap::build(vec![9, 4, 7, 1, 8, 2, 2, 6]);
        assert!(heap.valid_min_heap());
        assert_eq!(heap.peek(), Some(&1));

        let mut drained = Vec::new();
        while let Ok(v) = heap.extract_min() {
            assert!(heap.valid_min_heap());
            drained.push(v);
        }
        assert_eq!(drained, vec![1, 2, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn insert_keeps_invariant() {
        let mut heap = MinHeap::with_capacity(6);
        for v in [5, 3, 8, 1, 9, 0] {
            heap.insert(v).unwrap();
            assert!(heap.valid_min_heap());
        }
        assert_eq!(heap.extract_min().unwrap(), 0);
        assert_eq!(heap.extract_min().unwrap(), 1);
        assert_eq!(heap.len(), 4);
    }

    #[test]
    fn extract_from_empty_fails() {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(2);
        assert!(matches!(heap.extract_min(), Err(HuffmanError::EmptyQueueAccess)));

        let mut heap = MinHeap::build(vec![7]);
        assert_eq!(heap.extract_min().unwrap(), 7);
        assert!(matches!(heap.extract_min(), Err(HuffmanError::EmptyQueueAccess)));
    }

    #[test]
    fn insert_past_capacity_fails() {
        let mut heap = MinHeap::build(vec![1, 2]);
        assert!(matches!(heap.insert(3), Err(HuffmanError::HeapOverflow(2))));
        heap.extract_min().unwrap();
        heap.insert(3).unwrap();
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn merge_rounds_never_exceed_capacity() {
        let mut heap = MinHeap::build(vec![5u64, 9, 12, 13, 16, 45]);
        while heap.len() > 1 {
            let a = heap.extract_min().unwrap();
            let b = heap.extract_min().unwrap();
            heap.insert(a + b).unwrap();
            assert!(heap.valid_min_heap());
        }
        assert_eq!(heap.extract_min().unwrap(), 100);
    }
}
