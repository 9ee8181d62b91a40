//! Performance benchmarks for the SSE pipeline
//!
//! Measures frame splitting, frame decoding, and the full async reader
//! for streams of increasing length.
//! Run with: cargo bench

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::executor::block_on;
use futures::{stream, StreamExt};
use khoj::progress::ProgressProjector;
use khoj::sse::{decode_frame, event_stream, FrameSplitter, StreamItem};

/// One search pipeline iteration worth of frames
const PIPELINE_FRAMES: &[&str] = &[
    r#"{"type":"analysis","status":"started"}"#,
    r#"{"type":"analysis","status":"completed","search_queries":["rust sse","tokio streams"]}"#,
    r#"{"type":"search","status":"started","query":"rust sse"}"#,
    r#"{"type":"urls_found","count":4}"#,
    r#"{"type":"scraping","status":"started","url":"https://a.example/post"}"#,
    r#"{"type":"scraping","status":"completed","url":"https://a.example/post","title":"Streams"}"#,
    r#"{"type":"search_result","url":"https://a.example/post","title":"Streams","sentences_count":7}"#,
    r#"{"type":"deduplication","original_count":20,"final_count":14}"#,
];

/// Generate an SSE body with `rounds` pipeline iterations and a final answer
fn generate_body(rounds: usize) -> String {
    let mut body = String::new();
    for _ in 0..rounds {
        for frame in PIPELINE_FRAMES {
            body.push_str("data: ");
            body.push_str(frame);
            body.push_str("\n\n");
        }
    }
    body.push_str("data: {\"type\":\"final_response\",\"message\":\"Done.\"}\n\n");
    body.push_str("data: [DONE]\n\n");
    body
}

/// Split a body into network-sized chunks
fn chunks(body: &str, size: usize) -> Vec<Result<Bytes, String>> {
    body.as_bytes()
        .chunks(size)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect()
}

/// Benchmark frame splitting with small and large chunks
fn bench_frame_splitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_splitter");
    let body = generate_body(50);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for size in [16, 256, 4096].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}_byte_chunks", size)), size, |b, &size| {
            b.iter(|| {
                let mut splitter = FrameSplitter::new();
                let mut frames = 0;
                for chunk in body.as_bytes().chunks(size) {
                    frames += splitter.push(black_box(chunk)).len();
                }
                black_box(frames)
            });
        });
    }

    group.finish();
}

/// Benchmark decoding single frames
fn bench_decode_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_frame");

    let cases = [
        ("pipeline", format!("data: {}", PIPELINE_FRAMES[1])),
        ("done", "data: [DONE]".to_string()),
        ("text_fallback", "data: plain words, not json".to_string()),
    ];
    for (name, frame) in cases.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), frame, |b, frame| {
            b.iter(|| black_box(decode_frame(black_box(frame))));
        });
    }

    group.finish();
}

/// Benchmark the full reader plus projection for growing streams
fn bench_event_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_stream");

    for rounds in [1, 10, 100].iter() {
        let body = generate_body(*rounds);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(format!("{}_rounds", rounds)), &body, |b, body| {
            b.iter(|| {
                let bytes = stream::iter(chunks(body, 512));
                let mut events = event_stream(bytes);
                let mut projector = ProgressProjector::new();
                block_on(async {
                    while let Some(item) = events.next().await {
                        match item {
                            StreamItem::Event(event) => {
                                projector.apply(&event);
                            }
                            StreamItem::Complete => {
                                projector.complete();
                            }
                            StreamItem::Error(_) => break,
                        }
                    }
                });
                black_box(projector.into_state())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame_splitter, bench_decode_frame, bench_event_stream);
criterion_main!(benches);
