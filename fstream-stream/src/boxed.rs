// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{BoxFStream, FStream};

/// Extension trait providing the [`boxed`](Self::boxed) operator.
pub trait BoxedExt: FStream + Sized + 'static {
    /// Erases the concrete stream type.
    fn boxed(self) -> BoxFStream<Self::Item> {
        Box::new(self)
    }
}

impl<S: FStream + 'static> BoxedExt for S {}
