//! Text picture returned by reads
//!
//! A bulb on a stand, two lines. The picture is computed from the LED
//! state on every read and never stored.

use crate::state::LedState;

/// Picture of a lit bulb
pub const LIT: &[u8] = b"(*)\n = \n";

/// Picture of a dark bulb
pub const DARK: &[u8] = b"(.)\n = \n";

/// Length of either picture in bytes
pub const PICTURE_LEN: usize = LIT.len();

const _: () = assert!(LIT.len() == DARK.len());

/// Picture for a given LED state
pub const fn render(state: LedState) -> &'static [u8] {
    match state {
        LedState::On => LIT,
        LedState::Off => DARK,
    }
}

/// Copy the part of `picture` starting at `offset` into `buf`
///
/// Returns the number of bytes copied; zero once `offset` is at or past
/// the end.
pub fn copy_window(picture: &[u8], offset: usize, buf: &mut [u8]) -> usize {
    let Some(rest) = picture.get(offset..) else {
        return 0;
    };
    let len = rest.len().min(buf.len());
    buf[..len].copy_from_slice(&rest[..len]);
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(render(LedState::On), b"(*)\n = \n");
        assert_eq!(render(LedState::Off), b"(.)\n = \n");
        assert_eq!(PICTURE_LEN, 8);
    }

    #[test]
    fn test_copy_window() {
        let mut buf = [0u8; 3];
        assert_eq!(copy_window(LIT, 0, &mut buf), 3);
        assert_eq!(&buf, b"(*)");

        let mut buf = [0u8; 16];
        assert_eq!(copy_window(LIT, 3, &mut buf), 5);
        assert_eq!(&buf[..5], b"\n = \n");

        assert_eq!(copy_window(LIT, 8, &mut buf), 0);
        assert_eq!(copy_window(LIT, 100, &mut buf), 0);
        assert_eq!(copy_window(LIT, 0, &mut []), 0);
    }
}
