// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use ticket_transcoder::{Transcoder, TranscoderConfig};

static TRANSCODER: OnceLock<Transcoder> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let transcoder = TRANSCODER.get_or_init(|| {
        Transcoder::new(TranscoderConfig::default()).expect("default config is valid")
    });

    // Anything that decodes must survive a second trip.
    if let Ok(value) = transcoder.decode(data) {
        let bytes = transcoder.encode(&*value).expect("decoded value re-encodes");
        transcoder.decode(&bytes).expect("re-encoded bytes decode");
    }
});
