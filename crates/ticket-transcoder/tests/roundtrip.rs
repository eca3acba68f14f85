// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Round-trip, growth and truncation tests over the built-in type set.

use chrono::{DateTime, TimeZone, Utc};
use ticket_transcoder::model::{
    ExpirationPolicy, HardTimeoutExpirationPolicy, ImmutableAuthentication,
    MultiTimeUseOrTimeoutExpirationPolicy, MutableAuthentication, NeverExpiresExpirationPolicy,
    RememberMeDelegatingExpirationPolicy, SamlService, SimplePrincipal,
    SimpleWebApplicationService, ThrottledUseAndTimeoutExpirationPolicy, TicketGrantingTicket,
    TicketGrantingTicketExpirationPolicy, TimeoutExpirationPolicy,
};
use ticket_transcoder::{
    Codec, List, Map, Object, ObjectReader, ObjectWriter, Registration, Result, TranscodeError,
    Transcoder, TranscoderConfig, TypeDescriptor,
};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

fn transcoder() -> Transcoder {
    Transcoder::new(TranscoderConfig::default()).expect("transcoder")
}

fn principal() -> SimplePrincipal {
    let groups: List = vec![
        Box::new(String::from("staff")) as Box<dyn Object>,
        Box::new(String::from("vpn-users")),
    ];
    SimplePrincipal::new("jdoe")
        .with_attribute("mail", String::from("jdoe@example.org"))
        .with_attribute("memberOf", groups)
        .with_attribute("uidNumber", 1042i64)
}

fn remember_me() -> RememberMeDelegatingExpirationPolicy {
    RememberMeDelegatingExpirationPolicy {
        remember_me_expiration_policy: Box::new(
            HardTimeoutExpirationPolicy {
                time_to_kill_in_ms: 1_209_600_000,
            }
            .into(),
        ),
        session_expiration_policy: Box::new(
            TicketGrantingTicketExpirationPolicy {
                max_time_to_live_in_ms: 28_800_000,
                time_to_kill_in_ms: 7_200_000,
            }
            .into(),
        ),
    }
}

fn ticket_granting_ticket() -> TicketGrantingTicket {
    let mut auth = ImmutableAuthentication::new(principal(), at(1_700_000_000));
    auth.attributes
        .insert("rememberMe".into(), Box::new(true) as Box<dyn Object>);
    TicketGrantingTicket::new(
        "TGT-1-aBcDeFgHiJkLmNoPqRsTuVwXyZ-cas01",
        auth,
        remember_me(),
        at(1_700_000_000),
    )
}

fn assert_roundtrip(transcoder: &Transcoder, value: &dyn Object) -> Vec<u8> {
    let bytes = transcoder.encode(value).expect("encode");
    let decoded = transcoder.decode(&bytes).expect("decode");
    assert!(
        decoded.eq_object(value),
        "round-trip mismatch:\n  in:  {:?}\n  out: {:?}",
        value,
        decoded
    );
    bytes
}

#[test]
fn builtin_value_types_roundtrip() {
    let transcoder = transcoder();
    let mut map = Map::new();
    map.insert("count".into(), Box::new(3i32));
    map.insert("ratio".into(), Box::new(0.25f64));
    let values: Vec<Box<dyn Object>> = vec![
        Box::new(false) as Box<dyn Object>,
        Box::new(-17i32),
        Box::new(i64::MIN),
        Box::new(f64::MAX),
        Box::new(String::new()),
        Box::new(Utc.timestamp_opt(1_700_000_000, 999_999_999).single().expect("ts")),
        Box::new(List::new()),
        Box::new(map),
    ];
    for value in &values {
        assert_roundtrip(&transcoder, &**value);
    }
}

#[test]
fn domain_types_roundtrip() {
    let transcoder = transcoder();
    let date = at(1_700_000_000);
    let mutable = MutableAuthentication {
        principal: principal(),
        attributes: Map::new(),
        authenticated_date: date,
    };
    let saml = SamlService {
        id: "https://sp.example.org/shibboleth".into(),
        original_url: "https://sp.example.org/Shibboleth.sso/SAML/Artifact".into(),
        artifact_id: Some("AAH0+aRtZkWx".into()),
        request_id: Some("_192.168.16.51.1024506224022".into()),
    };
    let values: Vec<Box<dyn Object>> = vec![
        Box::new(principal()) as Box<dyn Object>,
        Box::new(SimpleWebApplicationService::new("https://mail.example.org/login")),
        Box::new(saml),
        Box::new(ImmutableAuthentication::new(principal(), date)),
        Box::new(mutable),
        Box::new(TimeoutExpirationPolicy {
            time_to_kill_in_ms: 7_200_000,
        }),
        Box::new(HardTimeoutExpirationPolicy {
            time_to_kill_in_ms: 0,
        }),
        Box::new(MultiTimeUseOrTimeoutExpirationPolicy {
            number_of_uses: 1,
            time_to_kill_in_ms: 10_000,
        }),
        Box::new(NeverExpiresExpirationPolicy),
        Box::new(remember_me()),
        Box::new(ThrottledUseAndTimeoutExpirationPolicy {
            time_to_kill_in_ms: 7_200_000,
            time_in_between_uses_in_ms: 500,
        }),
        Box::new(TicketGrantingTicketExpirationPolicy {
            max_time_to_live_in_ms: 28_800_000,
            time_to_kill_in_ms: 7_200_000,
        }),
    ];
    for value in &values {
        assert_roundtrip(&transcoder, &**value);
    }
}

#[test]
fn tickets_roundtrip_with_nested_families() {
    let transcoder = transcoder();
    let mut tgt = ticket_granting_ticket();
    let st = tgt.grant_service_ticket(
        "ST-1-xyz-cas01",
        SimpleWebApplicationService::new("https://mail.example.org/login"),
        MultiTimeUseOrTimeoutExpirationPolicy {
            number_of_uses: 1,
            time_to_kill_in_ms: 10_000,
        },
        at(1_700_000_030),
    );

    // Proxy-granting ticket chained to its parent.
    let mut pgt = TicketGrantingTicket::new(
        "PGT-1-proxy",
        tgt.authentication.clone(),
        NeverExpiresExpirationPolicy,
        at(1_700_000_040),
    );
    pgt.granting_ticket = Some(Box::new(tgt.clone()));

    assert_roundtrip(&transcoder, &tgt);
    assert_roundtrip(&transcoder, &st);
    assert_roundtrip(&transcoder, &pgt);

    let bytes = transcoder.encode(&st).expect("encode");
    let decoded: ticket_transcoder::model::ServiceTicket =
        transcoder.decode_as(&bytes).expect("decode");
    assert_eq!(decoded.granting_ticket.services.len(), 1);
    assert!(matches!(
        decoded.granting_ticket.expiration_policy,
        ExpirationPolicy::RememberMeDelegating(_)
    ));
}

#[test]
fn discriminator_is_stable_within_registry() {
    let transcoder = transcoder();
    let tgt = ticket_granting_ticket();
    let first = transcoder.encode(&tgt).expect("encode");
    let second = transcoder.encode(&tgt).expect("encode");
    assert_eq!(first[0], second[0]);
    assert_eq!(first, second);
}

#[test]
fn buffer_growth_matches_large_initial_buffer() {
    let mut rng = fastrand::Rng::with_seed(0x5EED);
    let small = Transcoder::builder()
        .initial_buffer_size(32)
        .build()
        .expect("transcoder");
    let large = Transcoder::builder()
        .initial_buffer_size(1024 * 1024)
        .build()
        .expect("transcoder");

    for round in 0..16 {
        let mut principal = SimplePrincipal::new(format!("user{}", round));
        for i in 0..rng.usize(1..64) {
            let len = rng.usize(0..512);
            let value: String = std::iter::repeat_with(|| rng.alphanumeric()).take(len).collect();
            principal = principal.with_attribute(format!("attr{}", i), value);
        }
        let grown = small.encode(&principal).expect("encode small");
        let direct = large.encode(&principal).expect("encode large");
        assert_eq!(grown, direct, "round {}", round);
        assert_eq!(
            small.decode_as::<SimplePrincipal>(&grown).expect("decode"),
            principal
        );
    }
    assert!(small.retries() > 0);
    assert_eq!(large.retries(), 0);
}

#[test]
fn every_strict_prefix_is_truncated() {
    let transcoder = transcoder();
    let mut tgt = ticket_granting_ticket();
    let st = tgt.grant_service_ticket(
        "ST-2",
        SamlService {
            id: "https://sp".into(),
            original_url: "https://sp/acs".into(),
            artifact_id: None,
            request_id: Some("_r1".into()),
        },
        TimeoutExpirationPolicy {
            time_to_kill_in_ms: 10_000,
        },
        at(1_700_000_100),
    );
    let values: Vec<Box<dyn Object>> = vec![
        Box::new(st) as Box<dyn Object>,
        Box::new(principal()),
        Box::new(Utc.timestamp_opt(1_700_000_000, 5).single().expect("ts")),
    ];

    for value in &values {
        let bytes = transcoder.encode(&**value).expect("encode");
        for len in 1..bytes.len() {
            match transcoder.decode(&bytes[..len]) {
                Err(TranscodeError::TruncatedRecord { .. }) => {}
                other => panic!(
                    "prefix {}/{} of {}: expected TruncatedRecord, got {:?}",
                    len,
                    bytes.len(),
                    value.type_name(),
                    other
                ),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Session {
    id: String,
    created_at: DateTime<Utc>,
}

ticket_transcoder::impl_object!(Session);

struct SessionCodec;

impl Codec<Session> for SessionCodec {
    fn write(&self, writer: &mut ObjectWriter<'_>, value: &Session) -> Result<()> {
        writer.write_str(&value.id)?;
        ticket_transcoder::codec::builtin::write_timestamp(writer, &value.created_at)
    }

    fn read(&self, reader: &mut ObjectReader<'_>) -> Result<Session> {
        Ok(Session {
            id: reader.read_string()?,
            created_at: ticket_transcoder::codec::builtin::read_timestamp(reader)?,
        })
    }
}

#[test]
fn session_with_tiny_initial_buffer() {
    let transcoder = Transcoder::builder()
        .initial_buffer_size(8)
        .register(
            Registration::new::<Session, _>(SessionCodec).pinned(TypeDescriptor::new(2048)),
        )
        .build()
        .expect("transcoder");
    let session = Session {
        id: "abc".into(),
        created_at: at(1_700_000_000),
    };

    let bytes = transcoder.encode(&session).expect("encode");
    assert!(transcoder.retries() >= 1);
    assert!(bytes.len() > 8);
    assert_eq!(transcoder.decode_as::<Session>(&bytes).expect("decode"), session);
}
