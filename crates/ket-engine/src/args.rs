// SPDX-License-Identifier: Apache-2.0
//! C-style argument vector marshaling.
//!
//! [`ArgVector`] turns an ordered sequence of host strings into the
//! `(int argc, char *argv[])` pair the engine initializer expects. Every
//! argument is copied byte-for-byte into its own heap buffer with exactly one
//! NUL appended; nothing is validated or rewritten, so interior NUL bytes are
//! kept as-is (the C side will simply see a shorter string).
//!
//! The pointer array has `argc + 1` slots: the final slot is a null pointer,
//! matching the `argv[argc] == NULL` guarantee C programs rely on.

use std::fmt;
use std::os::raw::{c_char, c_int};

/// Owned `argc`/`argv` buffer. Released when dropped.
pub struct ArgVector {
    buffers: Vec<Box<[u8]>>,
    pointers: Vec<*mut c_char>,
    argc: c_int,
}

impl ArgVector {
    /// Copy `args` into NUL-terminated buffers and build the pointer array.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not fit in a C `int`.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut buffers: Vec<Box<[u8]>> = args
            .into_iter()
            .map(|arg| nul_terminated(arg.as_ref()))
            .collect();

        let Ok(argc) = c_int::try_from(buffers.len()) else {
            panic!(
                "argument vector has {} entries, more than a C int can count",
                buffers.len()
            );
        };

        let mut pointers = Vec::with_capacity(buffers.len() + 1);
        pointers.extend(
            buffers
                .iter_mut()
                .map(|buf| buf.as_mut_ptr().cast::<c_char>()),
        );
        pointers.push(std::ptr::null_mut());

        Self {
            buffers,
            pointers,
            argc,
        }
    }

    /// Argument count as passed to the engine.
    pub fn argc(&self) -> c_int {
        self.argc
    }

    /// Pointer to the first element of the `argv` array.
    ///
    /// The pointer is valid until `self` is dropped or moved out of scope.
    /// `argv[argc()]` is always null.
    pub fn as_mut_ptr(&mut self) -> *mut *mut c_char {
        self.pointers.as_mut_ptr()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Bytes of argument `index`, without the trailing NUL.
    ///
    /// Indexes follow the original order even if the engine permuted the
    /// pointer array.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.buffers
            .get(index)
            .map(|buf| &buf[..buf.len() - 1])
    }

    /// Bytes of argument `index`, including the trailing NUL.
    pub fn get_with_nul(&self, index: usize) -> Option<&[u8]> {
        self.buffers.get(index).map(|buf| &buf[..])
    }

    /// Iterate over the arguments (without trailing NULs) in original order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.buffers.iter().map(|buf| &buf[..buf.len() - 1])
    }
}

impl fmt::Debug for ArgVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}

fn nul_terminated(bytes: &[u8]) -> Box<[u8]> {
    let mut buf = Vec::with_capacity(bytes.len() + 1);
    buf.extend_from_slice(bytes);
    buf.push(0);
    buf.into_boxed_slice()
}
