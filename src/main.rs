//! Tarifario CLI - Command-line interface
//!
//! Commands:
//!   quote     - Price one zone for a shipment
//!   zones     - Price the full zone matrix
//!   validate  - Validate a tariff table (and optionally a plan book)
//!   services  - List the service catalog
//!   schema    - Print JSON schema for a document type
//!   version   - Print version

use chrono::Datelike;
use std::path::PathBuf;
use std::process::ExitCode;

use tarifario::locale::format_eur;
use tarifario::*;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "quote" => cmd_quote(&args[2..], false),
        "zones" => cmd_quote(&args[2..], true),
        "validate" => cmd_validate(&args[2..]),
        "services" => cmd_services(),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("tarifario {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
Tarifario - freight-tariff pricing calculator

USAGE:
    tarifario <COMMAND> [OPTIONS]

COMMANDS:
    quote <table.yaml> --service <s> --zone <z> --weight <kg>
                                     Price one zone for a shipment
    zones <table.yaml> --service <s> --weight <kg>
                                     Price the full zone matrix
    validate <table.yaml>            Validate a tariff table
    services                         List the service catalog
    schema [table|planbook|breakdown]
                                     Print JSON schema for a document type
    version                          Print version

OPTIONS:
    --service <name>        Service (canonical name or alias, e.g. "maritimo")
    --zone <name>           Destination zone (quote only)
    --mode <m>              outbound | pickup | intercity (default: outbound)
    --weight <kg>           Actual package weight
    --dims <HxWxL>          Dimensions in cm, e.g. 60x40x30
    --qty <n>               Package quantity (default: 1)
    --discount <pct>        Linear discount percent
    --plan <group>          Plan group name (requires --plans)
    --plans <file>          Plan book YAML/JSON file
    --margin <pct>          Sale margin percent (prints sale price)
    --baseline <amount>     Manual base cost, voids discounts
    --inc1/--inc2/--inc3 <pct>   Year increment percentages
    --spc <amount>          Flat editable surcharge
    --supplements/--irregular/--mileage/--saturday <amount>
                            Free-form fees
    --json                  JSON output

EXAMPLES:
    tarifario quote rates.yaml --service courier24 --zone provincial --weight 3
    tarifario zones rates.yaml --service maritimo --weight 12 --margin 30
    tarifario quote rates.yaml --service economy --zone national --weight 8 \
        --plan VIP --plans plans.yaml --discount 5 --json
    tarifario validate rates.yaml --plans plans.yaml
"#
    );
}

/// Value of `--flag <value>`, if present.
fn opt_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn opt_f64(args: &[String], flag: &str) -> Result<Option<f64>> {
    match opt_value(args, flag) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("{flag} expects a number, got '{raw}'").into()),
    }
}

fn parse_dims(raw: &str) -> Result<Dimensions> {
    let parts: Vec<&str> = raw.split(['x', 'X']).collect();
    if parts.len() != 3 {
        return Err(format!("--dims expects HxWxL in cm, got '{raw}'").into());
    }
    let mut vals = [0.0f64; 3];
    for (i, part) in parts.iter().enumerate() {
        vals[i] = part
            .trim()
            .parse()
            .map_err(|_| format!("--dims expects numbers, got '{part}'"))?;
    }
    Ok(Dimensions::new(vals[0], vals[1], vals[2]))
}

fn parse_mode(raw: &str) -> Result<Mode> {
    match raw.to_lowercase().as_str() {
        "outbound" | "salida" => Ok(Mode::Outbound),
        "pickup" | "recogida" => Ok(Mode::Pickup),
        "intercity" | "interciudad" => Ok(Mode::Intercity),
        _ => Err(format!("Unknown mode '{raw}' (outbound|pickup|intercity)").into()),
    }
}

fn load_plan(args: &[String], service: Service) -> Result<Option<Plan>> {
    let Some(group) = opt_value(args, "--plan") else {
        return Ok(None);
    };
    let Some(book_path) = opt_value(args, "--plans") else {
        return Err("--plan requires --plans <file>".into());
    };
    let book = PlanBook::from_path(&PathBuf::from(book_path))?;
    match book.find(&group, service) {
        Some(plan) => Ok(Some(plan.clone())),
        None => Err(format!("No plan for group '{group}' and service '{service}'").into()),
    }
}

fn build_request(args: &[String]) -> Result<(QuoteRequest, Option<Plan>)> {
    let service_raw =
        opt_value(args, "--service").ok_or("--service is required")?;
    let service = canon::resolve_service(&service_raw)
        .ok_or_else(|| Error::UnknownService(service_raw.clone()))?;

    let weight = opt_f64(args, "--weight")?.ok_or("--weight is required")?;
    let mut package = Package::new(weight);
    if let Some(dims_raw) = opt_value(args, "--dims") {
        package = package.with_dimensions(parse_dims(&dims_raw)?);
    }
    if let Some(qty) = opt_f64(args, "--qty")? {
        package = package.with_quantity(qty as u32);
    }

    let mode = match opt_value(args, "--mode") {
        Some(raw) => parse_mode(&raw)?,
        None => Mode::Outbound,
    };

    let mut request = QuoteRequest::new(service, mode, package);
    request.linear_discount_percent = opt_f64(args, "--discount")?.unwrap_or(0.0);
    request.margin_percent = opt_f64(args, "--margin")?;
    request.baseline_override = opt_f64(args, "--baseline")?;
    request.increments = IncrementPercents {
        year1: opt_f64(args, "--inc1")?.unwrap_or(0.0),
        year2: opt_f64(args, "--inc2")?.unwrap_or(0.0),
        year3: opt_f64(args, "--inc3")?.unwrap_or(0.0),
    };
    request.fees = FlatFees {
        spc: opt_f64(args, "--spc")?.unwrap_or(0.0),
        supplements: opt_f64(args, "--supplements")?.unwrap_or(0.0),
        irregular: opt_f64(args, "--irregular")?.unwrap_or(0.0),
        mileage: opt_f64(args, "--mileage")?.unwrap_or(0.0),
        saturday: opt_f64(args, "--saturday")?.unwrap_or(0.0),
    };

    let plan = load_plan(args, service)?;
    Ok((request, plan))
}

fn cmd_quote(args: &[String], all_zones: bool) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: tarifario quote <table.yaml> [OPTIONS]".into());
    }
    let table = TariffTable::from_path(&PathBuf::from(&args[0]))?;
    let (request, plan) = build_request(&args[1..])?;
    let json_output = args.contains(&"--json".to_string());

    if all_zones {
        let quotes = quote_all_zones(&table, &request, plan.as_ref());
        if json_output {
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        } else {
            print_matrix(&request, &quotes);
        }
        return Ok(());
    }

    let zone_raw = opt_value(&args[1..], "--zone").ok_or("--zone is required")?;
    let zone =
        canon::resolve_zone(&zone_raw).ok_or_else(|| Error::UnknownZone(zone_raw.clone()))?;

    let quote = quote_zone(&table, &request, plan.as_ref(), zone);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print_quote(&request, &quote);
    }

    if quote.breakdown.status == BreakdownStatus::NotAvailable {
        return Err("Combination not available".into());
    }
    Ok(())
}

fn print_quote(request: &QuoteRequest, quote: &ZoneQuote) {
    let b = &quote.breakdown;
    println!(
        "Quote: {} {} to {}, {} kg chargeable (qty {})",
        request.service,
        request.mode,
        quote.zone.display_name(),
        quote.chargeable_weight_kg,
        request.package.quantity,
    );

    if b.status == BreakdownStatus::NotAvailable {
        match quote.reason {
            Some(UnavailableReason::Restriction) => {
                println!("  NOT AVAILABLE (restriction)");
                if let Some(detail) = &quote.detail {
                    println!("  {detail}");
                }
            }
            _ => println!("  NOT AVAILABLE (no tariff for this combination)"),
        }
        return;
    }

    let line = |label: &str, amount: f64| {
        if amount != 0.0 {
            println!("  {:<28}{:>14}", label, format_eur(amount));
        }
    };
    line("Initial cost", b.initial_cost);
    line("Linear discount", -b.linear_discount);
    line("Plan discount", -b.plan_discount);
    line("Base after discount", b.base_after_discount);
    line("Climate protection", b.climate_surcharge);
    line("Coverage extension", b.coverage_surcharge);
    line("Network canon", b.network_canon);
    line("Digital canon", b.digital_canon);
    line("Non-volumetric canon", b.non_volumetric_canon);
    line("Energy surcharge", b.energy_surcharge);
    line("Supplements", b.supplements);
    line("Irregular package", b.irregular_surcharge);
    line("Mileage", b.mileage);
    line("Saturday delivery", b.saturday_fee);
    println!("  {:<28}{:>14}", "Subtotal", format_eur(b.subtotal));

    let base_year = chrono::Utc::now().year();
    for (offset, amount, pct) in [
        (1, b.increment_year1, b.increment_percents.year1),
        (2, b.increment_year2, b.increment_percents.year2),
        (3, b.increment_year3, b.increment_percents.year3),
    ] {
        if amount != 0.0 {
            println!(
                "  {:<28}{:>14}",
                format!("Increment {} (+{}%)", base_year + offset, pct),
                format_eur(amount)
            );
        }
    }
    line("SPC", b.spc);
    println!("  {:<28}{:>14}", "TOTAL", format_eur(b.total_cost));

    if let Some(sale) = quote.sale_price {
        let margin = request.margin_percent.unwrap_or(0.0);
        println!("  {:<28}{:>14}", format!("Sale price ({margin}% margin)"), format_eur(sale));
    } else if request.margin_percent.is_some() {
        println!("  Sale price: not computable at this margin");
    }
}

fn print_matrix(request: &QuoteRequest, quotes: &[ZoneQuote]) {
    println!(
        "Zone matrix: {} {}, {} kg chargeable (qty {})",
        request.service,
        request.mode,
        quotes.first().map(|q| q.chargeable_weight_kg).unwrap_or(0.0),
        request.package.quantity,
    );
    for q in quotes {
        let cost = match q.breakdown.status {
            BreakdownStatus::Calculated => format_eur(q.breakdown.total_cost),
            _ => "NO".to_string(),
        };
        let sale = match q.sale_price {
            Some(s) => format!("  sale {}", format_eur(s)),
            None => String::new(),
        };
        println!("  {:<26}{:>14}{}", q.zone.display_name(), cost, sale);
    }
}

fn cmd_validate(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: tarifario validate <table.yaml> [--plans <file>]".into());
    }

    let table = TariffTable::from_path(&PathBuf::from(&args[0]))?;
    let mut problems = table.validate();

    if let Some(book_path) = opt_value(args, "--plans") {
        let book = PlanBook::from_path(&PathBuf::from(book_path))?;
        problems.extend(book.validate());
    }

    let errors: Vec<&String> = problems.iter().filter(|p| !p.starts_with("Warning:")).collect();

    if problems.is_empty() {
        println!("OK: {} rows, fingerprint {}", table.rows.len(), table.hash());
        return Ok(());
    }
    for problem in &problems {
        println!("  {problem}");
    }
    if errors.is_empty() {
        println!("OK with warnings: fingerprint {}", table.hash());
        Ok(())
    } else {
        Err(format!("{} problem(s) found", errors.len()).into())
    }
}

fn cmd_services() -> Result<()> {
    println!("{:<14}{:<16}{:>8}{:>12}  flags", "service", "name", "energy", "vol. div.");
    for service in ALL_SERVICES {
        let t = service.terms();
        let mut flags = Vec::new();
        if t.is_shop {
            flags.push("shop-restricted");
        }
        if t.is_maritime {
            flags.push("10kg-step-canaries");
        }
        if t.is_euro_business {
            flags.push("portugal-discounts");
        }
        println!(
            "{:<14}{:<16}{:>7.2}%{:>12}  {}",
            service.key(),
            service.display_name(),
            t.energy_rate * 100.0,
            t.volumetric_divisor,
            flags.join(", "),
        );
    }
    Ok(())
}

fn cmd_schema(args: &[String]) -> Result<()> {
    let name = args.first().map(String::as_str).unwrap_or("table");
    let schema = match name {
        "table" => schemars::schema_for!(TariffTable),
        "planbook" => schemars::schema_for!(PlanBook),
        "breakdown" => schemars::schema_for!(CostBreakdown),
        other => return Err(format!("Unknown schema '{other}' (table|planbook|breakdown)").into()),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
