use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use ragdb_core::config::Config;
use ragdb_core::data_processor::DataProcessor;
use ragdb_embed::get_default_producer;
use ragdb_retrieval::report::render_report;
use ragdb_retrieval::retriever::IngestBatch;
use ragdb_retrieval::{RetrievalSession, Retriever};

const EMBED_BATCH: usize = 64;

fn parse_args() -> (Option<PathBuf>, Option<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [data_dir] [\"query\"]", prog);
        eprintln!("Example: {} ./dev_data/txt \"how do I purify water?\"", prog);
        std::process::exit(1);
    }
    let data_dir = args.first().map(PathBuf::from);
    let query = args.get(1).cloned();
    (data_dir, query)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let (data_dir_arg, query_arg) = parse_args();
    let data_dir = data_dir_arg.unwrap_or_else(|| {
        let dir: String = config.get("data.raw_txt_dir").unwrap_or_else(|_| "./dev_data/txt".to_string());
        ragdb_core::config::expand_path(dir)
    });
    let dim = config.dim();
    let k = config.k();

    println!("🧠 ragdb - multimodal RAG retrieval core");
    println!("Ingesting from {} (dim={}, k={})", data_dir.display(), dim, k);

    let processor = DataProcessor::new();
    let records = processor.process_directory(&data_dir)?;
    if records.is_empty() {
        eprintln!("Nothing to index. Add .txt files under {} and retry.", data_dir.display());
        std::process::exit(1);
    }

    let producer = get_default_producer(dim);
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%)").expect("template").progress_chars("#>-"));
    let mut batches: Vec<IngestBatch> = Vec::new();
    for chunk in records.chunks(EMBED_BATCH) {
        let texts: Vec<String> = chunk.iter().map(|r| r.content.clone()).collect();
        let embeddings = producer.embed_batch(&texts)?;
        batches.push((embeddings, chunk.to_vec()));
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    let mut retriever = Retriever::new(producer, k);
    let stored = retriever.rebuild(batches)?;
    println!("✅ Ingest complete ({} records)", stored);

    if let Some(query) = query_arg {
        let session = retriever.ask(&query)?;
        print_session(&session);
        return Ok(());
    }

    // Interactive loop: the corpus lives only for this process.
    println!("\nType a question (empty line to exit):");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let query = line.trim();
        if query.is_empty() { break; }
        let session = retriever.ask(query)?;
        print_session(&session);
    }
    Ok(())
}

fn print_session(session: &RetrievalSession) {
    if session.results.is_empty() {
        println!("No evidence found");
        return;
    }
    println!("\n🔍 {} results (intent: {})", session.results.len(), session.intent);
    for (i, r) in session.results.iter().enumerate() {
        let preview: String = r.record.content.chars().take(120).collect();
        println!("  {}. d={:.4}  {} [{}]", i + 1, r.distance, r.record.source, r.record.modality);
        println!("     📝 {}", preview);
    }

    println!("\nConfidence: {}%", (session.confidence * 100.0) as u32);
    if let Some(note) = &session.uncertainty {
        println!("⚠️  {}", note);
    }

    println!("📊 Coverage:");
    let mut coverage: Vec<_> = session.coverage.iter().collect();
    coverage.sort_by(|a, b| a.0.cmp(b.0));
    for (source, pct) in coverage {
        println!("  {}: {:.2}%", source, pct);
    }

    if session.has_conflict {
        println!("⚠️  {} potentially conflicting evidence pairs", session.conflicts.len());
        for (a, b) in &session.conflicts {
            println!("  - {} <-> {}", a.source, b.source);
        }
    }

    if let Ok(path) = env::var("APP_EXPORT_REPORT") {
        let report = render_report(session, None);
        if let Err(e) = std::fs::write(&path, report) {
            eprintln!("Failed to write report to {}: {}", path, e);
        } else {
            println!("⬇️  Report written to {}", path);
        }
    }
    if env::var("APP_PRINT_JSON").map(|v| v == "1").unwrap_or(false) {
        match serde_json::to_string_pretty(session) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON export failed: {}", e),
        }
    }
}
