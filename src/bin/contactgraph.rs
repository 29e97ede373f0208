//! Contactgraph CLI — inspect an address book snapshot.
//!
//! Usage:
//!   contactgraph [--data path] [--verbose] list <persons|tags|relationships>
//!   contactgraph [--data path] neighbors <id>
//!   contactgraph [--data path] link <from> <to>
//!   contactgraph [--data path] find <keywords...>

use clap::{Parser, Subcommand, ValueEnum};
use contactgraph::{
    AddressBook, AddressBookSnapshot, FilteredView, PersonFilter, PersonId, RelationshipView,
};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "contactgraph",
    version,
    about = "Contacts, tags and relationship links"
)]
struct Cli {
    /// Path to the JSON address book snapshot
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every entry of one kind
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Show persons directly related to a person
    Neighbors {
        /// Person id
        id: i64,
    },
    /// Show the shortest chain of relationships between two persons
    Link {
        /// Starting person id
        from: i64,
        /// Destination person id
        to: i64,
    },
    /// Find persons whose name contains any of the keywords
    Find {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Persons,
    Tags,
    Relationships,
}

/// Get the default snapshot path (~/.local/share/contactgraph/addressbook.json)
fn default_data_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("contactgraph").join("addressbook.json")
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_book(data: Option<PathBuf>) -> Result<AddressBook, String> {
    let path = data.unwrap_or_else(default_data_path);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot found, starting empty");
        return Ok(AddressBook::new());
    }
    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let snapshot = AddressBookSnapshot::from_json(&json)
        .map_err(|e| format!("cannot parse '{}': {}", path.display(), e))?;
    AddressBook::from_snapshot(snapshot)
        .map_err(|e| format!("cannot load '{}': {}", path.display(), e))
}

fn parse_id(raw: i64) -> Result<PersonId, String> {
    PersonId::new(raw).map_err(|e| e.to_string())
}

fn print_view(book: &AddressBook, view: &RelationshipView) {
    for entry in view {
        let name = entry.name().unwrap_or("<missing>");
        match &entry.relationship {
            Some(rel) => println!("{:>6}  {:<24}  {}", entry.person_id, name, rel.description()),
            None => println!("{:>6}  {:<24}", entry.person_id, name),
        }
    }
    tracing::debug!(rows = view.len(), persons = book.persons().len(), "printed view");
}

fn cmd_list(book: &AddressBook, kind: ListKind) -> i32 {
    match kind {
        ListKind::Persons => {
            if book.persons().is_empty() {
                println!("No persons.");
                return 0;
            }
            println!("{:>6}  {:<24}  {:<14}  {}", "ID", "NAME", "PHONE", "EMAIL");
            println!("{}", "-".repeat(72));
            for p in book.persons() {
                println!("{:>6}  {:<24}  {:<14}  {}", p.id(), p.name(), p.phone(), p.email());
            }
        }
        ListKind::Tags => {
            if book.tags().is_empty() {
                println!("No tags.");
                return 0;
            }
            for t in book.tags() {
                println!("{:>6}  {:<20}  {}  {}", t.id(), t.name(), t.color(), t.description());
            }
        }
        ListKind::Relationships => {
            if book.relationships().is_empty() {
                println!("No relationships.");
                return 0;
            }
            for r in book.relationships() {
                println!("{:>6} <-> {:<6}  {}", r.part1(), r.part2(), r.description());
            }
        }
    }
    0
}

fn cmd_neighbors(book: &AddressBook, id: i64) -> i32 {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match book.query_immediate_relationship(id) {
        Ok(view) if view.is_empty() => {
            println!("No relationships for person {}.", id);
            0
        }
        Ok(view) => {
            print_view(book, &view);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_link(book: &AddressBook, from: i64, to: i64) -> i32 {
    let (from, to) = match (parse_id(from), parse_id(to)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match book.query_link(from, to) {
        Ok(view) if view.is_empty() => {
            println!("No link between {} and {}.", from, to);
            0
        }
        Ok(view) => {
            print_view(book, &view);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_find(book: &AddressBook, keywords: Vec<String>) -> i32 {
    let mut view = FilteredView::new(PersonFilter::new().with_name_keywords(keywords));
    let found = view.items(book.persons());
    println!("{} person(s) listed", found.len());
    for p in found {
        println!("{:>6}  {}", p.id(), p.name());
    }
    0
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let book = match open_book(cli.data) {
        Ok(book) => book,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::List { kind } => cmd_list(&book, kind),
        Commands::Neighbors { id } => cmd_neighbors(&book, id),
        Commands::Link { from, to } => cmd_link(&book, from, to),
        Commands::Find { keywords } => cmd_find(&book, keywords),
    };
    std::process::exit(code);
}
