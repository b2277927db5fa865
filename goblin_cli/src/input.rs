//! Console input helpers. Invalid input reprompts; no game state is touched
//! until a prompt returns.

use std::io::{self, Write};

/// Print a prompt and read one trimmed line.
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// Read a line, reprompting until it is non-empty.
pub fn read_nonempty(prompt: &str) -> io::Result<String> {
    loop {
        let line = read_line(prompt)?;
        if !line.is_empty() {
            return Ok(line);
        }
        println!("Please enter something!");
    }
}

/// Read a menu choice in 1..=max, reprompting on anything else.
pub fn menu_choice(prompt: &str, max: u32) -> io::Result<u32> {
    loop {
        let line = read_line(prompt)?;
        match parse_menu_choice(&line, max) {
            Some(choice) => return Ok(choice),
            None => println!("Invalid choice! Please try again."),
        }
    }
}

/// Read a positive count, reprompting on anything else.
pub fn read_count(prompt: &str) -> io::Result<usize> {
    loop {
        let line = read_line(prompt)?;
        match line.parse::<usize>() {
            Ok(count) if count >= 1 => return Ok(count),
            _ => println!("Please enter a number of at least 1."),
        }
    }
}

/// Read a y/n confirmation; anything but y/yes means no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let line = read_line(prompt)?;
    Ok(matches!(line.to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn parse_menu_choice(raw: &str, max: u32) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|n| (1..=max).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choice_in_range() {
        assert_eq!(parse_menu_choice("1", 5), Some(1));
        assert_eq!(parse_menu_choice("5", 5), Some(5));
    }

    #[test]
    fn test_parse_menu_choice_rejects_junk() {
        assert_eq!(parse_menu_choice("0", 5), None);
        assert_eq!(parse_menu_choice("6", 5), None);
        assert_eq!(parse_menu_choice("", 5), None);
        assert_eq!(parse_menu_choice("pirate", 5), None);
        assert_eq!(parse_menu_choice("-1", 5), None);
    }
}
