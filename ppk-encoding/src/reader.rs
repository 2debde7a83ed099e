//! Reader trait and associated implementations.

use crate::{decode::Decode, Error, Result};

/// Reader trait which decodes the binary SSH wire serialization from an
/// input source.
pub trait Reader: Sized {
    /// Read as much data as is needed to exactly fill `out`.
    ///
    /// This is the base decoding method on which the rest of the trait is
    /// implemented in terms of.
    ///
    /// # Returns
    /// - `Ok(bytes)` if the expected amount of data was read
    /// - `Err(Error::Length)` if the exact amount of data couldn't be read
    fn read<'o>(&mut self, out: &'o mut [u8]) -> Result<&'o [u8]>;

    /// Get the length of the remaining data.
    fn remaining_len(&self) -> usize;

    /// Is decoding finished?
    fn is_finished(&self) -> bool {
        self.remaining_len() == 0
    }

    /// Decode length-prefixed data.
    ///
    /// Decodes a `uint32` which identifies the length of some encapsulated
    /// data, then calls the given reader function with the length of the
    /// remaining data.
    fn read_prefixed<T, E, F>(&mut self, f: F) -> core::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Self) -> core::result::Result<T, E>;

    /// Decode a length-prefixed `string` as described in [RFC4251 § 5],
    /// returning the raw bytes.
    ///
    /// [RFC4251 § 5]: https://datatracker.ietf.org/doc/html/rfc4251#section-5
    fn read_byten<'o>(&mut self, out: &'o mut [u8]) -> Result<&'o [u8]> {
        self.read_prefixed(|reader| {
            let slice = out.get_mut(..reader.remaining_len()).ok_or(Error::Length)?;
            reader.read(slice)?;
            Ok(slice as &[u8])
        })
    }

    /// Decode a length-prefixed `string` and validate it as UTF-8.
    fn read_string<'o>(&mut self, buf: &'o mut [u8]) -> Result<&'o str> {
        Ok(core::str::from_utf8(self.read_byten(buf)?)?)
    }

    /// Drain the given number of bytes from the reader, discarding them.
    fn drain(&mut self, n_bytes: usize) -> Result<()> {
        let mut byte = [0];
        for _ in 0..n_bytes {
            self.read(&mut byte)?;
        }
        Ok(())
    }

    /// Ensure that decoding is finished.
    ///
    /// # Errors
    ///
    /// - Returns `Error::TrailingData` if there is data remaining in the reader.
    fn ensure_finished(&self) -> Result<()> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(Error::TrailingData {
                remaining: self.remaining_len(),
            })
        }
    }

    /// Finish decoding, returning the given value if there is no remaining
    /// data, or an error otherwise.
    fn finish<T>(self, value: T) -> Result<T> {
        self.ensure_finished()?;
        Ok(value)
    }
}

impl Reader for &[u8] {
    fn read<'o>(&mut self, out: &'o mut [u8]) -> Result<&'o [u8]> {
        if self.len() >= out.len() {
            let (head, tail) = self.split_at(out.len());
            *self = tail;
            out.copy_from_slice(head);
            Ok(out)
        } else {
            Err(Error::Length)
        }
    }

    fn read_prefixed<T, E, F>(&mut self, f: F) -> core::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Self) -> core::result::Result<T, E>,
    {
        let prefix_len = usize::decode(self)?;

        if self.len() < prefix_len {
            return Err(Error::Length.into());
        }

        let (mut prefix, remaining) = self.split_at(prefix_len);
        let ret = f(&mut prefix)?;
        *self = remaining;
        Ok(ret)
    }

    fn remaining_len(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Reader;
    use crate::{Decode, Error};

    #[test]
    fn read_exact() {
        let mut reader = [0x01, 0x02, 0x03].as_slice();
        let mut buf = [0u8; 2];
        assert_eq!(reader.read(&mut buf).expect("read"), &[0x01, 0x02]);
        assert_eq!(reader.remaining_len(), 1);
    }

    #[test]
    fn read_past_end_of_input() {
        let mut reader = [0x01].as_slice();
        let mut buf = [0u8; 2];
        assert_eq!(reader.read(&mut buf), Err(Error::Length));
    }

    #[test]
    fn read_prefixed_rejects_truncated_body() {
        // length prefix says 4 bytes but only 2 follow
        let mut reader = [0x00, 0x00, 0x00, 0x04, 0xaa, 0xbb].as_slice();
        let result: Result<Vec<u8>, Error> = Vec::decode(&mut reader);
        assert_eq!(result, Err(Error::Length));
    }

    #[test]
    fn finish_rejects_trailing_data() {
        let reader = [0x00].as_slice();
        assert_eq!(
            reader.finish(()),
            Err(Error::TrailingData { remaining: 1 })
        );
    }
}
