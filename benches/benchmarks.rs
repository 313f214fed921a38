use criterion::{BenchmarkId,black_box, criterion_group, criterion_main, Criterion};

use anatrie::*;
use anatrie::test::*;

pub fn letters_benchmark(c: &mut Criterion) {
    c.bench_function("letters_word_12_chars", |b| b.iter(||{
        black_box("benchmarking").letters()
    }));

    c.bench_function("anahash_sentence_34_chars", |b| b.iter(||{
        black_box("the lazy dog jumped over the quick brown fox").letters().anahash()
    }));
}

pub fn search_benchmark(c: &mut Criterion) {
    let dictionary = get_test_dictionary();
    let params = get_test_searchparams();

    c.bench_with_input(BenchmarkId::new("char_anagrams","do it so good"), &dictionary, |b, dictionary| b.iter(||{
        dictionary.char_anagrams(black_box("do it so good"), &params).count()
    }));

    c.bench_with_input(BenchmarkId::new("word_anagrams_cold","do it so good"), &dictionary, |b, dictionary| b.iter(||{
        let mut session = SearchSession::new(params.clone());
        dictionary.word_anagrams(black_box("do it so good"), &mut session).count()
    }));

    let mut session = SearchSession::new(params.clone());
    c.bench_with_input(BenchmarkId::new("word_anagrams_warm","do it so good"), &dictionary, |b, dictionary| b.iter(||{
        dictionary.word_anagrams(black_box("do it so good"), &mut session).count()
    }));
}

criterion_group!(benches, letters_benchmark, search_benchmark);
criterion_main!(benches);
