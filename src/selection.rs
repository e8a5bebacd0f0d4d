//! Next/previous index choice under shuffle.
//!
//! Repeat is not handled here: it only matters at end-of-track, where the
//! controller restarts the current track instead of asking for a new index.

use rand::Rng;

/// Index to play after `current`.
///
/// Without shuffle this wraps from the last entry to the first; with no
/// current selection it starts at 0. With shuffle it draws uniformly and
/// redraws while the draw equals `current`, except for a one-entry playlist
/// where the same index is accepted. `None` for an empty playlist.
pub fn next_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if shuffle {
        return Some(random_other(current, len, rng));
    }

    Some(match current {
        Some(c) => (c + 1) % len,
        None => 0,
    })
}

/// Index to play before `current`. Mirror image of [`next_index`]; with no
/// current selection it starts at the last entry.
pub fn previous_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    shuffle: bool,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if shuffle {
        return Some(random_other(current, len, rng));
    }

    Some(match current {
        Some(c) => (c % len + len - 1) % len,
        None => len - 1,
    })
}

fn random_other<R: Rng + ?Sized>(current: Option<usize>, len: usize, rng: &mut R) -> usize {
    loop {
        let draw = rng.gen_range(0..len);
        if len == 1 || Some(draw) != current {
            return draw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn next_advances_and_wraps() {
        let mut r = rng();
        assert_eq!(next_index(Some(0), 3, false, &mut r), Some(1));
        assert_eq!(next_index(Some(2), 3, false, &mut r), Some(0));
        assert_eq!(next_index(None, 3, false, &mut r), Some(0));
    }

    #[test]
    fn previous_steps_back_and_wraps() {
        let mut r = rng();
        assert_eq!(previous_index(Some(1), 3, false, &mut r), Some(0));
        assert_eq!(previous_index(Some(0), 3, false, &mut r), Some(2));
        assert_eq!(previous_index(None, 3, false, &mut r), Some(2));
    }

    #[test]
    fn empty_playlist_has_no_next_or_previous() {
        let mut r = rng();
        assert_eq!(next_index(None, 0, false, &mut r), None);
        assert_eq!(next_index(Some(0), 0, true, &mut r), None);
        assert_eq!(previous_index(None, 0, true, &mut r), None);
    }

    #[test]
    fn shuffle_on_single_track_returns_zero() {
        let mut r = rng();
        for _ in 0..50 {
            assert_eq!(next_index(Some(0), 1, true, &mut r), Some(0));
            assert_eq!(previous_index(Some(0), 1, true, &mut r), Some(0));
        }
    }

    #[test]
    fn shuffle_never_repeats_current_on_two_tracks() {
        let mut r = rng();
        for _ in 0..50 {
            assert_eq!(next_index(Some(0), 2, true, &mut r), Some(1));
            assert_eq!(previous_index(Some(1), 2, true, &mut r), Some(0));
        }
    }

    proptest! {
        #[test]
        fn next_cycles_back_to_start(len in 1usize..64, start_seed in any::<usize>()) {
            let start = start_seed % len;
            let mut r = rng();
            let mut cur = start;
            for _ in 0..len {
                cur = next_index(Some(cur), len, false, &mut r).unwrap();
            }
            prop_assert_eq!(cur, start);
        }

        #[test]
        fn previous_cycles_back_to_start(len in 1usize..64, start_seed in any::<usize>()) {
            let start = start_seed % len;
            let mut r = rng();
            let mut cur = start;
            for _ in 0..len {
                cur = previous_index(Some(cur), len, false, &mut r).unwrap();
            }
            prop_assert_eq!(cur, start);
        }

        #[test]
        fn shuffle_draw_is_in_range_and_differs(len in 2usize..64, cur_seed in any::<usize>(), seed in any::<u64>()) {
            let cur = cur_seed % len;
            let mut r = StdRng::seed_from_u64(seed);
            let n = next_index(Some(cur), len, true, &mut r).unwrap();
            let p = previous_index(Some(cur), len, true, &mut r).unwrap();
            prop_assert!(n < len && p < len);
            prop_assert_ne!(n, cur);
            prop_assert_ne!(p, cur);
        }
    }
}
