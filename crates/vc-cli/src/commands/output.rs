//! Terminal formatting shared by the commands

use colored::{ColoredString, Colorize};
use vc_core::comment::{Comment, UserRole};

fn role_label(role: UserRole) -> ColoredString {
    match role {
        UserRole::Student => role.as_str().normal(),
        UserRole::Instructor => role.as_str().cyan(),
        UserRole::Admin => role.as_str().magenta(),
    }
}

/// Print a comment and, when populated, its replies
pub fn print_comment(comment: &Comment) {
    print_entry(comment, "  ");

    if let Some(replies) = &comment.replies {
        for reply in replies {
            print_entry(reply, "      ↳ ");
        }
    }
    println!();
}

fn print_entry(comment: &Comment, prefix: &str) {
    let edited = if comment.is_edited {
        " (edited)".dimmed().to_string()
    } else {
        String::new()
    };

    println!(
        "{}{} [{}] {} {}{}",
        prefix,
        comment.user_name.bold(),
        role_label(comment.user_role),
        comment.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        format!("♥ {}", comment.likes).red(),
        edited
    );

    let body_indent = " ".repeat(prefix.chars().count());
    for line in comment.content.lines() {
        println!("{}{}", body_indent, line);
    }
    println!("{}{}", body_indent, comment.id.to_string().dimmed());
}
