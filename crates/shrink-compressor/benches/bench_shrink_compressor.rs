use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use shrink_compressor::Compressor;
use shrink_core::{CompressorConfig, EncodedWriter, FunctionKind, StripConsole, Token};

const WORDS: [&str; 8] = ["index", "buffer", "counter", "result", "value", "options", "handler", "element"];

/// A script of `functions` functions, each with a few params, locals, a
/// nested closure and a console call.
fn generate_script(functions: usize) -> Vec<u16> {
    let mut rng = rand::thread_rng();
    let mut w = EncodedWriter::script();
    for f in 0..functions {
        w.function(FunctionKind::Statement);
        w.name(&format!("fn{f}")).token(Token::Lp);
        let params: Vec<String> = (0..rng.gen_range(1..4))
            .map(|p| format!("{}{p}", WORDS[rng.gen_range(0..WORDS.len())]))
            .collect();
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                w.token(Token::Comma);
            }
            w.name(p);
        }
        w.tokens(&[Token::Rp, Token::Lc, Token::Eol, Token::Var]);
        w.name("total").token(Token::Assign).number(rng.gen_range(0..1000) as f64);
        w.tokens(&[Token::Semi, Token::Eol]);
        w.name("console").token(Token::Dot).name("log").token(Token::Lp).string("step");
        w.tokens(&[Token::Comma]).name("total").tokens(&[Token::Rp, Token::Semi, Token::Eol]);
        w.name("total").token(Token::AssignAdd);
        w.function(FunctionKind::Expression);
        w.token(Token::Lp).name("item").tokens(&[Token::Rp, Token::Lc, Token::Return]);
        w.name("item").token(Token::Mul).name(&params[0]);
        w.tokens(&[Token::Semi, Token::Rc, Token::FunctionEnd, Token::Lp]).number(rng.gen::<f64>());
        w.tokens(&[Token::Rp, Token::Semi, Token::Eol, Token::Return]).name("total");
        w.tokens(&[Token::Semi, Token::Eol, Token::Rc, Token::FunctionEnd, Token::Eol]);
    }
    w.finish()
}

fn bench_compress(c: &mut Criterion) {
    let small = generate_script(10);
    let large = generate_script(500);

    for &(name, level) in &[("keep", StripConsole::None), ("strip", StripConsole::All)] {
        let compressor = Compressor::new(CompressorConfig::default().with_strip_console(level)).unwrap();
        let n = name;
        c.bench_function(&format!("compress_{n}_10_functions"), |b| {
            b.iter(|| black_box(compressor.compress_script(black_box(&small)).unwrap()))
        });
        c.bench_function(&format!("compress_{n}_500_functions"), |b| {
            b.iter(|| black_box(compressor.compress_script(black_box(&large)).unwrap()))
        });
    }
}

fn bench_pretty(c: &mut Criterion) {
    let script = generate_script(100);
    let compressor = Compressor::new(CompressorConfig::pretty()).unwrap();
    c.bench_function("compress_pretty_100_functions", |b| {
        b.iter(|| black_box(compressor.compress_script(black_box(&script)).unwrap()))
    });
}

criterion_group!(benches, bench_compress, bench_pretty);
criterion_main!(benches);
