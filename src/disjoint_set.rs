// https://en.wikipedia.org/wiki/Disjoint-set_data_structure
use std::convert::TryFrom;

use crate::error::DisjointSetError;

/// What is stored for a single element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
	/// The element represents its set, which holds `size` elements.
	Root { size: usize },
	/// The element hangs under `parent`, which is not necessarily a root.
	Child { parent: usize },
}

/// Union-find over the elements `0..capacity`, with union by size and
/// path compression.
///
/// Every indexed operation checks its arguments before touching anything, so
/// an `OutOfRange` error never leaves a half-applied change behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
	entries: Vec<Entry>,
	set_count: usize,
}

impl DisjointSet {
	pub fn new(capacity: usize) -> DisjointSet {
		DisjointSet {
			entries: vec![Entry::Root { size: 1 }; capacity],
			set_count: capacity,
		}
	}

	pub fn capacity(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of disjoint sets currently held.
	pub fn set_count(&self) -> usize {
		self.set_count
	}

	/// Turns a signed, caller-side index into an element of this set.
	pub fn element(&self, raw: i64) -> Result<usize, DisjointSetError> {
		match usize::try_from(raw) {
			Ok(element) if element < self.capacity() => Ok(element),
			_ => Err(self.out_of_range(raw)),
		}
	}

	/// The raw entry stored for `element`. For a child this is its immediate
	/// parent as currently recorded, which may be several links below the root.
	pub fn entry(&self, element: usize) -> Result<Entry, DisjointSetError> {
		self.check(element)?;
		Ok(self.entries[element])
	}

	pub fn find(&mut self, element: usize) -> Result<usize, DisjointSetError> {
		self.check(element)?;
		Ok(self.locate(element).0)
	}

	pub fn size_of(&mut self, element: usize) -> Result<usize, DisjointSetError> {
		self.check(element)?;
		Ok(self.locate(element).1)
	}

	pub fn connected(&mut self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
		self.check(a)?;
		self.check(b)?;
		Ok(self.locate(a).0 == self.locate(b).0)
	}

	/// Merges the sets holding `a` and `b`. Returns `false` if they were
	/// already in the same set, in which case the partition is unchanged.
	///
	/// The smaller set goes under the larger one. On equal sizes the root of
	/// `b` stays the root.
	pub fn union(&mut self, a: usize, b: usize) -> Result<bool, DisjointSetError> {
		self.check(a)?;
		self.check(b)?;
		let (root_a, size_a) = self.locate(a);
		let (root_b, size_b) = self.locate(b);
		if root_a == root_b {
			trace!("union({}, {}): already share root {}", a, b, root_a);
			return Ok(false);
		}

		let (root, child) = if size_a > size_b {
			(root_a, root_b)
		} else {
			(root_b, root_a)
		};
		self.entries[root] = Entry::Root { size: size_a + size_b };
		self.entries[child] = Entry::Child { parent: root };
		self.set_count -= 1;
		debug!("union({}, {}): {} now under {}, size {}", a, b, child, root, size_a + size_b);
		Ok(true)
	}

	/// The current partition. Each set is sorted, and sets are ordered by
	/// their smallest element.
	pub fn sets(&mut self) -> Vec<Vec<usize>> {
		let mut slot_of_root: Vec<Option<usize>> = vec![None; self.capacity()];
		let mut sets: Vec<Vec<usize>> = Vec::with_capacity(self.set_count);
		for element in 0..self.capacity() {
			let (root, _) = self.locate(element);
			match slot_of_root[root] {
				Some(slot) => sets[slot].push(element),
				None => {
					slot_of_root[root] = Some(sets.len());
					sets.push(vec![element]);
				}
			}
		}
		sets
	}

	// `element` must already be checked. Returns the root and its set size,
	// then points everything on the walked path straight at the root.
	fn locate(&mut self, element: usize) -> (usize, usize) {
		let mut root = element;
		let size = loop {
			match self.entries[root] {
				Entry::Child { parent } => root = parent,
				Entry::Root { size } => break size,
			}
		};

		let mut node = element;
		while let Entry::Child { parent } = self.entries[node] {
			if parent != root {
				trace!("compress {}: {} -> {}", node, parent, root);
				self.entries[node] = Entry::Child { parent: root };
			}
			node = parent;
		}
		(root, size)
	}

	fn check(&self, element: usize) -> Result<(), DisjointSetError> {
		if element < self.capacity() {
			Ok(())
		} else {
			Err(self.out_of_range(i64::try_from(element).unwrap_or(i64::MAX)))
		}
	}

	fn out_of_range(&self, index: i64) -> DisjointSetError {
		warn!("rejected index {} (capacity {})", index, self.capacity());
		DisjointSetError::OutOfRange { index, capacity: self.capacity() }
	}
}
