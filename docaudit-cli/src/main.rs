use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::Path;

// Import from docaudit-core
use docaudit_core::{AuditConfig, DebugConfig, DocumentAnalyzer, RuleEngine};

#[derive(Parser)]
#[command(name = "docaudit")]
#[command(about = "Check a .docx document against formatting rules and write a discrepancy report")]
struct Args {
    /// Path to the .docx file to check
    #[arg(short, long, required_unless_present = "show_configs")]
    input: Option<String>,

    /// Path to custom rules file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Report file path
    #[arg(short, long, default_value = "analysis_report.txt")]
    output: String,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Hide progress bars
    #[arg(long)]
    no_progress: bool,

    /// Resolve unset fonts, sizes, indents and spacing through styles
    #[arg(long)]
    inherit_styles: bool,

    /// Print per-rule timings
    #[arg(long)]
    profile: bool,

    /// Print findings whose fragment matches this pattern (regex or plain text, repeatable)
    #[arg(long = "debug-filter")]
    debug_filters: Vec<String>,

    /// Dump the parsed document and findings as JSON for inspection
    #[arg(long)]
    dump_document: bool,

    /// Directory for dump output
    #[arg(long, default_value = "test_outputs/dump")]
    dump_dir: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🦀 Docaudit Document Checker");

    if args.show_configs {
        show_help()?;
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        eprintln!("❌ No input file given (use --input <path>)");
        std::process::exit(1);
    };

    // Load config with fallback to defaults
    let mut config = AuditConfig::load_with_fallback(args.config.as_deref());

    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }

    // Apply CLI overrides to config
    if args.no_progress {
        config.show_progress = false;
    }
    if args.inherit_styles {
        config.inherit_styles = true;
    }

    let mut analyzer = match DocumentAnalyzer::with_config(input, config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("❌ Failed to load {}: {e}", input);
            std::process::exit(1);
        }
    };

    let mut engine = RuleEngine::new();
    if !args.debug_filters.is_empty() {
        engine.set_debug_config(DebugConfig::new(true, args.debug_filters.clone()));
    }

    let added = engine.run(&mut analyzer)?;
    println!("✅ Checks complete: {} findings", added);

    let summary = analyzer.summary();
    for (kind, count) in &summary.counts {
        println!("   - {}: {}", kind, count);
    }

    if args.profile {
        engine.print_timings();
    }

    if args.dump_document {
        dump_document(&analyzer, input, &args.dump_dir)?;
    }

    if let Err(e) = analyzer.generate_report(&args.output) {
        eprintln!("❌ Failed to write report: {e}");
        std::process::exit(1);
    }
    println!("💾 Report saved to: {}", args.output);

    Ok(())
}

fn show_help() -> Result<()> {
    println!("\n📋 Available Configuration Options:");
    println!("  --input <path>          .docx file to check");
    println!("  --config <path>         Load custom rules file (YAML)");
    println!("  --output <path>         Report path (default: analysis_report.txt)");
    println!("  --no-progress           Hide progress bars");
    println!("  --inherit-styles        Resolve unset formatting through styles and defaults");
    println!("  --profile               Print per-rule timings");
    println!("  --debug-filter <pat>    Trace findings whose fragment matches <pat>");
    println!("  --dump-document         Write parsed document and findings as JSON");

    println!("\n📐 Rule names for pipeline.rules:");
    println!("  TextFormat       - fonts, alignment, first-line indent, spacing");
    println!("  TableOfContents  - heading numbering");
    println!("  References       - reference list format");
    println!("  Figures          - figure caption alignment");

    println!("\n📝 Default rules file:");
    println!("{}", AuditConfig::default().to_yaml()?);

    println!("📝 Usage Examples:");
    println!("  cargo run -- -i coursework.docx");
    println!("  cargo run -- -i coursework.docx -c rules.yaml -o report.txt");
    println!("  cargo run -- --show-configs");
    Ok(())
}

fn dump_document(analyzer: &DocumentAnalyzer, input: &str, output_dir: &str) -> Result<()> {
    let document = analyzer.document();
    fs::create_dir_all(output_dir)?;

    let document_path = format!("{}/document.json", output_dir);
    fs::write(&document_path, serde_json::to_string_pretty(document)?)?;
    println!("  💾 {} ({} paragraphs)", document_path, document.paragraphs.len());

    let findings_path = format!("{}/findings.json", output_dir);
    fs::write(&findings_path, serde_json::to_string_pretty(analyzer.findings())?)?;
    println!("  💾 {} ({} findings)", findings_path, analyzer.findings().len());

    // Summary file: quick reference for scripts comparing runs
    let input_name = Path::new(input)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let summary = serde_json::json!({
        "input": input_name,
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "paragraphs": document.paragraphs.len(),
        "runs": document.paragraphs.iter().map(|p| p.runs.len()).sum::<usize>(),
        "findings": analyzer.summary(),
    });
    let summary_path = format!("{}/summary.json", output_dir);
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path);

    Ok(())
}
