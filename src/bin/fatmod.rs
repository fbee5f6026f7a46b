/// Interactive console for FAT-style disk images

use fatmod::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "cat",
                "create",
                "dir",
                "dump",
                "exit",
                "help",
                "info",
                "list",
                "ls",
                "open",
                "quit",
                "rm",
                "sector",
                "touch",
                "write",
                "write-mode",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".fatmod_history");
        p
    })
}

fn main() {
    println!("=== fatmod ===");
    println!("Interactive console for FAT-style disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl = Editor::new().expect("Failed to create editor");
    rl.set_helper(Some(CommandCompleter::new()));

    // Load history if available
    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    // Path of the selected image; every command opens it fresh and
    // closes it again, so there is no long-lived handle to keep
    // consistent.
    let mut image_path: Option<String> = None;
    let mut write_mode = WriteMode::Append;

    loop {
        let readline = rl.readline("> ");
        let input = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => {
                print_help();
            }
            "quit" | "exit" => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            "open" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                match FatImage::open_read_only(&parts[1]) {
                    Ok(image) => {
                        let size = image.len().unwrap_or(0);
                        println!("Opened: {} ({} bytes)", parts[1], size);
                        image_path = Some(parts[1].clone());
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "create" => {
                if parts.len() < 2 {
                    println!("Usage: create <path> [sectors]");
                    continue;
                }
                let sectors: u32 = if parts.len() > 2 {
                    parts[2].parse().unwrap_or(2880)
                } else {
                    2880
                };
                match FatImage::create(&parts[1], sectors) {
                    Ok(_) => {
                        println!("Created {} ({} sectors)", parts[1], sectors);
                        image_path = Some(parts[1].clone());
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "info" => {
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                show_info(&path);
            }
            "ls" | "dir" | "list" => {
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                match FatFileSystem::open_read_only(&path) {
                    Ok(mut fs) => match fs.list() {
                        Ok(records) => {
                            if records.is_empty() {
                                println!("No files found.");
                            } else {
                                println!("{:<9} {:<4} {:>8} {:>5}", "Name", "Ext", "Size", "Slot");
                                println!("{}", "-".repeat(29));
                                for record in records {
                                    println!(
                                        "{:<9} {:<4} {:>8} {:>5}",
                                        record.name, record.ext, record.size, record.index
                                    );
                                }
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "cat" => {
                if parts.len() < 2 {
                    println!("Usage: cat <name>");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                match FatFileSystem::open_read_only(&path) {
                    Ok(mut fs) => match fs.read_file(&parts[1]) {
                        Ok(data) => {
                            print!("{}", String::from_utf8_lossy(&data));
                            if !data.ends_with(b"\n") {
                                println!();
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "dump" => {
                if parts.len() < 2 {
                    println!("Usage: dump <name>");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                match FatFileSystem::open_read_only(&path) {
                    Ok(mut fs) => match fs.read_file(&parts[1]) {
                        Ok(data) => {
                            println!("File: {} ({} bytes)", parts[1], data.len());
                            print_hex_dump(&data, data.len());
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "sector" => {
                if parts.len() < 2 {
                    println!("Usage: sector <number>");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                let sector: u32 = match parts[1].parse() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("Invalid sector number: {}", parts[1]);
                        continue;
                    }
                };
                match FatImage::open_read_only(&path) {
                    Ok(mut image) => match image.read_sector(sector) {
                        Ok(data) => {
                            println!("Sector {} ({} bytes):", sector, data.len());
                            print_hex_dump(&data, data.len());
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "touch" => {
                if parts.len() < 2 {
                    println!("Usage: touch <name>");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                match FatFileSystem::open(&path) {
                    Ok(mut fs) => match fs.create_file(&parts[1]) {
                        Ok(_) => println!("Created file: {}", parts[1]),
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "rm" => {
                if parts.len() < 2 {
                    println!("Usage: rm <name>");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                match FatFileSystem::open(&path) {
                    Ok(mut fs) => match fs.delete_file(&parts[1]) {
                        Ok(_) => println!("Deleted: {}", parts[1]),
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "write" => {
                if parts.len() < 4 {
                    println!("Usage: write <name> <length> <byte> [offset]");
                    continue;
                }
                let path = match image_path.as_ref() {
                    Some(p) => p.clone(),
                    None => {
                        println!("No image selected. Use 'open <path>' or 'create <path>' first.");
                        continue;
                    }
                };
                let length: u32 = match parts[2].parse() {
                    Ok(n) => n,
                    Err(_) => {
                        println!("Invalid length: {}", parts[2]);
                        continue;
                    }
                };
                let fill: u8 = match parse_hex_or_dec(&parts[3]) {
                    Some(b) => b,
                    None => {
                        println!("Invalid byte value: {}", parts[3]);
                        continue;
                    }
                };
                let offset: u32 = if parts.len() > 4 {
                    parts[4].parse().unwrap_or(0)
                } else {
                    0
                };
                match FatFileSystem::open(&path) {
                    Ok(mut fs) => {
                        fs.set_write_mode(write_mode);
                        match fs.write_file(&parts[1], offset, length, fill) {
                            Ok(new_size) => println!(
                                "Wrote {} bytes of 0x{:02X} to {}; new size {}",
                                length, fill, parts[1], new_size
                            ),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "write-mode" => {
                if parts.len() < 2 {
                    println!("Write mode: {}", write_mode_name(write_mode));
                    println!("Options: append, offset");
                } else {
                    match parts[1].to_lowercase().as_str() {
                        "append" => {
                            write_mode = WriteMode::Append;
                            println!("Write mode set to: append");
                        }
                        "offset" => {
                            write_mode = WriteMode::StrictOffset;
                            println!("Write mode set to: offset");
                        }
                        other => {
                            println!("Unknown write mode: {}", other);
                            println!("Options: append, offset");
                        }
                    }
                }
            }
            _ => {
                println!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    command
                );
            }
        }
    }
}

/// Parse command line input, respecting quoted strings
fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>                  - Select a disk image file (use quotes for paths with spaces)");
    println!("  create <path> [sectors]      - Create a blank image (default 2880 sectors)");
    println!("  info                         - Show image geometry and directory usage");
    println!("  ls                           - List files in the root directory (dir, list)");
    println!("  cat <name>                   - Print file content as ASCII text");
    println!("  dump <name>                  - Hex dump file content");
    println!("  sector <number>              - Hex dump one raw sector");
    println!("  touch <name>                 - Create a new empty file");
    println!("  rm <name>                    - Delete a file");
    println!("  write <name> <len> <byte> [offset]");
    println!("                               - Write <len> copies of <byte> into the file;");
    println!("                                 <offset> is honored only in offset write mode");
    println!("  write-mode [append|offset]   - Show or set where writes land");
    println!("  help                         - Show this help");
    println!("  quit, exit                   - Exit");
}

fn show_info(path: &str) {
    let mut image = match FatImage::open_read_only(path) {
        Ok(image) => image,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let size = image.len().unwrap_or(0);
    println!("Image: {}", path);
    println!("Size: {} bytes ({} sectors)", size, size / 512);
    println!("Sector size: {} bytes", layout::SECTOR_SIZE);
    println!("Allocation unit: {} bytes", layout::CLUSTER_SIZE);
    println!("Directory capacity: {} entries", layout::DIR_CAPACITY);

    let mut live = 0;
    let mut deleted = 0;
    let mut special = 0;
    let mut scanner = DirectoryScanner::new();
    loop {
        match scanner.step(&mut image) {
            Ok(Some((_, _, kind))) => match kind {
                EntryKind::Free => break,
                EntryKind::Deleted => deleted += 1,
                EntryKind::Special => special += 1,
                EntryKind::Live => live += 1,
            },
            Ok(None) => break,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        }
    }
    println!("Live entries: {}", live);
    println!("Deleted entries: {}", deleted);
    if special > 0 {
        println!("Special entries: {}", special);
    }
}

fn write_mode_name(mode: WriteMode) -> &'static str {
    match mode {
        WriteMode::Append => "append",
        WriteMode::StrictOffset => "offset",
    }
}

fn print_hex_dump(data: &[u8], max_bytes: usize) {
    let len = data.len().min(max_bytes);

    for (i, chunk) in data[..len].chunks(16).enumerate() {
        print!("{:04X}: ", i * 16);

        // Print hex
        for (j, byte) in chunk.iter().enumerate() {
            print!("{:02X} ", byte);
            if j == 7 {
                print!(" ");
            }
        }

        // Pad if less than 16 bytes
        for j in chunk.len()..16 {
            print!("   ");
            if j == 7 {
                print!(" ");
            }
        }

        print!(" |");

        // Print ASCII
        for byte in chunk {
            let c = if *byte >= 32 && *byte < 127 {
                *byte as char
            } else {
                '.'
            };
            print!("{}", c);
        }

        println!("|");
    }

    if data.len() > max_bytes {
        println!("... ({} more bytes)", data.len() - max_bytes);
    }
}

fn parse_hex_or_dec(s: &str) -> Option<u8> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
