//! Benchmarks for splicing and the invalidation pass
//!
//! Run with: cargo bench splice

use quill::config::AssistConfig;
use quill::gateway::SpellDictionary;
use quill::model::AppModel;
use quill::TextBuffer;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn document(paragraphs: usize) -> String {
    "Teh quick brown fox jumps over the lazy dog and teh cat watches.\n".repeat(paragraphs)
}

// ============================================================================
// Buffer operations
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn splice_middle(paragraphs: usize) {
    let mut buffer = TextBuffer::from_text(&document(paragraphs));
    let mid = buffer.len_chars() / 2;
    let _ = buffer.splice(mid, mid + 5, divan::black_box("replacement"));
}

#[divan::bench(args = [100, 1_000])]
fn find_all_matches(bencher: divan::Bencher, paragraphs: usize) {
    let buffer = TextBuffer::from_text(&document(paragraphs));
    bencher.bench_local(|| buffer.find_all(divan::black_box("fox")));
}

// ============================================================================
// Edit with tracked state
// ============================================================================

#[divan::bench(args = [100, 1_000])]
fn edit_with_tracked_state(bencher: divan::Bencher, paragraphs: usize) {
    let text = document(paragraphs);
    let errors = SpellDictionary::default().check(&text);

    bencher
        .with_inputs(|| {
            let mut model = AppModel::with_text(&text, AssistConfig::default());
            model
                .spellcheck
                .apply_results(0, errors.clone(), &model.document.buffer);
            model.find.set_query("fox", &model.document.buffer);
            let len = model.buffer().len_chars();
            let _ = model.select(len - 20, len - 10);
            model
        })
        .bench_local_values(|mut model| {
            let _ = model.apply_edit(10, 10, divan::black_box("very "));
            model
        });
}

#[divan::bench(args = [100, 1_000])]
fn spellcheck_scan(bencher: divan::Bencher, paragraphs: usize) {
    let text = document(paragraphs);
    let dictionary = SpellDictionary::default();
    bencher.bench_local(|| dictionary.check(divan::black_box(&text)));
}
