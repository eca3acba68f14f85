// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use ticket_transcoder::{RegistryPolicy, Transcoder};

static TRANSCODER: OnceLock<Transcoder> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let transcoder = TRANSCODER.get_or_init(|| {
        Transcoder::builder()
            .policy(RegistryPolicy::FailClosed)
            .initial_buffer_size(16)
            .build()
            .expect("fail-closed config is valid")
    });

    let _ = transcoder.decode(data);
});
