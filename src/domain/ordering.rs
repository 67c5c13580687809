/// Relocates the element at `from` to index `to`, shifting everything in
/// between by one slot.
///
/// This is a move, not a swap: after the call the moved element sits at
/// `to` and every other element keeps its relative order. Out-of-range
/// indices leave the slice untouched.
///
/// # Examples
/// ```
/// use schedule_core::domain::ordering::move_element;
///
/// let mut seq = vec!['A', 'B', 'C', 'D'];
/// move_element(&mut seq, 0, 2);
/// assert_eq!(seq, vec!['B', 'C', 'A', 'D']);
/// ```
pub fn move_element<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
}
