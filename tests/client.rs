mod test_helpers;

use assert_matches::assert_matches;
use bytes::Bytes;
use hop_mock::testing::fixtures::{blob_text, circular_text, voevent_xml};
use hop_mock::{Error, Record, StartOffset};

use crate::test_helpers::{client, maybe_start_logging, random_group_name, random_topic_name};

fn format_header(format: &str) -> Vec<(String, Bytes)> {
    vec![
        ("_format".to_owned(), Bytes::copy_from_slice(format.as_bytes())),
        ("_sender".to_owned(), Bytes::from_static(b"test")),
    ]
}

#[test]
fn round_trip_sample_payloads() {
    maybe_start_logging();

    let (broker, client) = client();
    let topic = random_topic_name();

    let producer = client.producer(&topic);
    let samples = [
        (circular_text(), "circular"),
        (voevent_xml().to_owned(), "voevent"),
        (blob_text().to_owned(), "blob"),
    ];
    for (payload, format) in &samples {
        producer.write(payload.clone(), format_header(format));
    }
    producer.close();

    for (payload, format) in &samples {
        let record = Record::new(payload.clone(), format_header(format));
        assert!(broker.has_message(&topic, &record));
    }

    let consumer = client
        .consumer([topic.as_str()], random_group_name())
        .with_start_offset(StartOffset::Earliest)
        .build()
        .unwrap();

    let messages = consumer.stream().collect::<Vec<_>>();
    assert_eq!(messages.len(), samples.len());
    for (message, (payload, format)) in messages.iter().zip(&samples) {
        assert_eq!(message.value().as_ref(), payload.as_bytes());
        assert_eq!(message.headers(), format_header(format));
        assert_eq!(message.topic(), topic);
    }

    assert_eq!(consumer.stream().count(), 0);
    consumer.close();
}

#[test]
fn default_start_offset_is_latest() {
    maybe_start_logging();

    let (broker, client) = client();
    let topic = random_topic_name();
    let group = random_group_name();
    let producer = client.producer(&topic);
    producer.write("backlog", vec![]);

    let consumer = client
        .consumer([topic.as_str()], group.as_str())
        .build()
        .unwrap();
    assert_eq!(consumer.start_offset(), StartOffset::Latest);
    assert_eq!(broker.offset(&topic, &group), Some(1));

    // nothing is read before this write
    producer.write("fresh", vec![]);
    let values = consumer
        .stream()
        .map(|m| m.value().clone())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["fresh"]);
}

#[test]
fn consumer_reads_topics_in_bound_order() {
    maybe_start_logging();

    let (_broker, client) = client();
    let (first, second) = (random_topic_name(), random_topic_name());

    client.producer(&first).write("1", vec![]);
    client.producer(&second).write("2", vec![]);
    client.producer(&first).write("3", vec![]);

    let consumer = client
        .consumer([second.clone(), first.clone()], random_group_name())
        .with_start_offset(StartOffset::Earliest)
        .build()
        .unwrap();
    consumer.subscribe([&first, &second]).unwrap();

    let values = consumer
        .stream()
        .map(|m| m.value().clone())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["2", "1", "3"]);
}

#[test]
fn subscribe_rejects_unbound_topic() {
    let (_broker, client) = client();
    let topic = random_topic_name();

    let consumer = client
        .consumer([topic.as_str()], random_group_name())
        .build()
        .unwrap();

    let other = random_topic_name();
    let err = consumer.subscribe([&other]).unwrap_err();
    assert_matches!(err, Error::NotSubscribed { topic } if topic == other);
}

#[test]
fn groups_consume_independently() {
    maybe_start_logging();

    let (broker, client) = client();
    let topic = random_topic_name();
    let producer = client.producer(&topic);
    for value in ["a", "b", "c"] {
        producer.write(value, vec![]);
    }

    let build = |group: &str| {
        client
            .consumer([topic.as_str()], group)
            .with_start_offset(StartOffset::Earliest)
            .build()
            .unwrap()
    };

    let (g1, g2) = (random_group_name(), random_group_name());
    assert_eq!(build(&g1).stream().count(), 3);
    assert_eq!(build(&g2).stream().count(), 3);
    assert_eq!(build(&g1).stream().count(), 0);

    assert_eq!(broker.offset(&topic, &g1), Some(3));
    assert_eq!(broker.offset(&topic, &g2), Some(3));
}

#[tokio::test]
async fn stream_drives_async_consumers() {
    maybe_start_logging();

    let (_broker, client) = client();
    let topic = random_topic_name();
    let producer = client.producer(&topic);
    for i in 0..10 {
        producer.write(format!("msg {i}"), vec![]);
    }

    let consumer = client
        .consumer([topic.as_str()], random_group_name())
        .with_start_offset(StartOffset::Earliest)
        .build()
        .unwrap();

    let mut stream = consumer.stream();
    let mut offsets = vec![];
    while let Some(message) = futures_util::StreamExt::next(&mut stream).await {
        offsets.push(message.offset());
    }
    assert_eq!(offsets, (0..10).collect::<Vec<_>>());
}
