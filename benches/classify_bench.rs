use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vibescout::agent::classify::{ClassifierRules, classify_reply, strip_control_lines};
use vibescout::events::parse_event_block;

fn bench_classify(c: &mut Criterion) {
    let rules = ClassifierRules::default();
    let celebration = "Awesome choice! Have a blast tonight!";
    let search = "Let me pull up the magic list!\n**SEARCH_ACTION:** techno warehouse north side";
    let conversation = "If tonight had a flavor, would it be spicy or sweet? Pick one and tell me.";

    c.bench_function("classify_celebration", |b| {
        b.iter(|| black_box(classify_reply(black_box(celebration), &rules)))
    });
    c.bench_function("classify_search", |b| {
        b.iter(|| black_box(classify_reply(black_box(search), &rules)))
    });
    c.bench_function("classify_conversation", |b| {
        b.iter(|| black_box(classify_reply(black_box(conversation), &rules)))
    });
    c.bench_function("strip_control_lines", |b| {
        b.iter(|| {
            black_box(strip_control_lines(
                black_box(search),
                black_box("SEARCH_ACTION"),
            ))
        })
    });
}

fn bench_parse_event(c: &mut Criterion) {
    let block = "Event: Night Market\n\
                 Date: 2025-06-14\n\
                 Location: Riverside Hall\n\
                 Cost: 20 RON\n\
                 Description: Street food and live DJs until late.\n\
                 Source: https://events.example.com/night-market";

    c.bench_function("parse_event_block", |b| {
        b.iter(|| black_box(parse_event_block(black_box(block))))
    });
}

criterion_group!(benches, bench_classify, bench_parse_event);
criterion_main!(benches);
