//! Maps parsed commands onto library operations and renders the results.

use crate::cli::{AddArgs, Command, EditArgs, Toggle};
use anyhow::{bail, Result};
use bookshelf_core::{genres, Book, BookForm, Library, LibraryStorage};
use std::io::Write;

/// Executes `command` against `library`, writing user-facing output to `out`.
///
/// # Errors
/// - Form and validation failures, with a message meant for the user.
/// - Unknown positions for `show` and `edit`.
/// - Write failures on `out`.
pub fn run<S: LibraryStorage>(
    command: &Command,
    library: &mut Library<S>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List { flat } => list(library, *flat, out),
        Command::Show { position } => show(library, *position, out),
        Command::Add(args) => add(library, args, out),
        Command::Edit { position, fields } => edit(library, *position, fields, out),
        Command::Remove { position } => remove(library, *position, out),
        Command::Sort => {
            let mode = library.advance_sort();
            writeln!(out, "Sorted by {mode}.")?;
            Ok(())
        }
        Command::Genres => {
            for genre in library.used_genres() {
                writeln!(out, "{genre}")?;
            }
            Ok(())
        }
        Command::Group { state } => {
            let enabled = *state == Toggle::On;
            library.set_group_by_genre(enabled);
            let label = if enabled { "on" } else { "off" };
            writeln!(out, "Genre grouping is {label}.")?;
            Ok(())
        }
        Command::GenreList => genre_list(out),
        Command::Version => version(out),
    }
}

/// Prints the accepted genre labels. Needs no library.
pub fn genre_list(out: &mut impl Write) -> Result<()> {
    for genre in genres() {
        writeln!(out, "{genre}")?;
    }
    Ok(())
}

pub fn version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "bookshelf {}", bookshelf_core::core_version())?;
    Ok(())
}

fn list<S: LibraryStorage>(
    library: &Library<S>,
    flat: bool,
    out: &mut impl Write,
) -> Result<()> {
    if library.is_empty() {
        writeln!(out, "The library is empty.")?;
        return Ok(());
    }

    writeln!(
        out,
        "Count: {} | Sorted by {}",
        library.len(),
        library.sort_mode()
    )?;

    if flat || !library.group_by_genre() {
        for (index, book) in library.books().iter().enumerate() {
            writeln!(out, "{}. {}", index + 1, book.list_label())?;
        }
        return Ok(());
    }

    for section in library.genre_sections() {
        writeln!(out, "{}", section.genre)?;
        for (index, book) in section.entries {
            writeln!(out, "  {}. {}", index + 1, book.list_label())?;
        }
    }
    Ok(())
}

fn show<S: LibraryStorage>(
    library: &Library<S>,
    position: usize,
    out: &mut impl Write,
) -> Result<()> {
    let Some(book) = library.get(to_index(position)) else {
        bail!("No book at position {position}.");
    };
    write_details(book, out)
}

fn write_details(book: &Book, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", book.title())?;
    writeln!(out, "By {}", book.author().full_name())?;
    writeln!(out, "Publication Date: {}", book.year_of_publication())?;
    writeln!(out, "Genre: {}", book.genre())?;
    writeln!(out, "Number of pages: {}", book.number_of_pages())?;
    writeln!(
        out,
        "Estimated reading time: {}",
        book.estimated_reading_time()
    )?;
    let stars = usize::try_from(book.rating()).unwrap_or_default();
    writeln!(out, "Rating: {}", "*".repeat(stars))?;
    if let Some(notes) = book.notes() {
        writeln!(out, "Notes:\n{notes}")?;
    }
    Ok(())
}

fn add<S: LibraryStorage>(
    library: &mut Library<S>,
    args: &AddArgs,
    out: &mut impl Write,
) -> Result<()> {
    let form = BookForm {
        title: args.title.clone(),
        year_of_publication: args.year.clone(),
        author_first_name: args.author_first_name.clone(),
        author_last_name: args.author_last_name.clone(),
        number_of_pages: args.pages.clone(),
        estimated_reading_time: args.hours.clone(),
        genre: args.genre.clone(),
        rating: args.rating.clone(),
        notes: args.notes.clone().unwrap_or_default(),
    };

    let book = form.submit()?;
    let label = book.list_label();
    library.add(book);
    writeln!(out, "Added #{}: {label}", library.len())?;
    Ok(())
}

fn edit<S: LibraryStorage>(
    library: &mut Library<S>,
    position: usize,
    fields: &EditArgs,
    out: &mut impl Write,
) -> Result<()> {
    let index = to_index(position);
    let Some(current) = library.get(index) else {
        bail!("No book at position {position}.");
    };

    let form = merge_edit(BookForm::from_book(current), fields);
    let draft = form.parse()?;
    library.edit_at(index, &draft)?;

    if let Some(book) = library.get(index) {
        writeln!(out, "Updated #{position}: {}", book.list_label())?;
    }
    Ok(())
}

fn merge_edit(mut form: BookForm, fields: &EditArgs) -> BookForm {
    let overrides = [
        (&mut form.title, &fields.title),
        (&mut form.author_first_name, &fields.author_first_name),
        (&mut form.author_last_name, &fields.author_last_name),
        (&mut form.year_of_publication, &fields.year),
        (&mut form.number_of_pages, &fields.pages),
        (&mut form.estimated_reading_time, &fields.hours),
        (&mut form.genre, &fields.genre),
        (&mut form.rating, &fields.rating),
        (&mut form.notes, &fields.notes),
    ];
    for (target, value) in overrides {
        if let Some(value) = value {
            target.clone_from(value);
        }
    }
    form
}

fn remove<S: LibraryStorage>(
    library: &mut Library<S>,
    position: usize,
    out: &mut impl Write,
) -> Result<()> {
    match library.remove_at(to_index(position)) {
        Some(book) => writeln!(out, "Removed: {}", book.list_label())?,
        None => writeln!(out, "No book at position {position}; nothing removed.")?,
    }
    Ok(())
}

/// Position 0 maps past the end so it falls into the out-of-range path.
fn to_index(position: usize) -> usize {
    position.checked_sub(1).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::{run, to_index};
    use crate::cli::{AddArgs, Command, EditArgs, Toggle};
    use bookshelf_core::{FormError, Library, MemoryLibraryStorage, SortMode};

    fn add_args(title: &str, genre: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            author_first_name: "Mary".to_string(),
            author_last_name: "Shelley".to_string(),
            year: "1818".to_string(),
            pages: "280".to_string(),
            hours: "6.5".to_string(),
            genre: genre.to_string(),
            rating: "4".to_string(),
            notes: None,
        }
    }

    fn execute(library: &mut Library<MemoryLibraryStorage>, command: Command) -> String {
        let mut out = Vec::new();
        run(&command, library, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn to_index_is_one_based() {
        assert_eq!(to_index(1), 0);
        assert_eq!(to_index(0), usize::MAX);
    }

    #[test]
    fn add_then_list_grouped_and_flat() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        execute(&mut library, Command::Add(add_args("Frankenstein", "Horror")));
        execute(&mut library, Command::Add(add_args("Mathilda", "Classic")));

        let grouped = execute(&mut library, Command::List { flat: false });
        assert_eq!(
            grouped,
            concat!(
                "Count: 2 | Sorted by title (A-Z)\n",
                "Classic\n",
                "  2. Mathilda by Shelley\n",
                "Horror\n",
                "  1. Frankenstein by Shelley\n",
            )
        );

        let flat = execute(&mut library, Command::List { flat: true });
        assert_eq!(
            flat,
            "Count: 2 | Sorted by title (A-Z)\n1. Frankenstein by Shelley\n2. Mathilda by Shelley\n"
        );
    }

    #[test]
    fn invalid_form_surfaces_user_message() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        let mut args = add_args("Frankenstein", "Horror");
        args.pages = "lots".to_string();

        let mut out = Vec::new();
        let err = run(&Command::Add(args), &mut library, &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormError>(),
            Some(&FormError::PagesNotInteger)
        );
        assert!(library.is_empty());
    }

    #[test]
    fn edit_overrides_only_given_fields() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        execute(&mut library, Command::Add(add_args("Frankenstein", "Horror")));
        let id = library.get(0).unwrap().id();

        let output = execute(
            &mut library,
            Command::Edit {
                position: 1,
                fields: EditArgs {
                    rating: Some("5".to_string()),
                    notes: Some("The Modern Prometheus".to_string()),
                    ..EditArgs::default()
                },
            },
        );

        assert_eq!(output, "Updated #1: Frankenstein by Shelley\n");
        let book = library.get(0).unwrap();
        assert_eq!(book.id(), id);
        assert_eq!(book.rating(), 5);
        assert_eq!(book.genre(), "Horror");
        assert_eq!(book.notes(), Some("The Modern Prometheus"));
    }

    #[test]
    fn remove_unknown_position_is_reported_not_failed() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        let output = execute(&mut library, Command::Remove { position: 0 });
        assert_eq!(output, "No book at position 0; nothing removed.\n");
    }

    #[test]
    fn show_unknown_position_fails() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        let mut out = Vec::new();
        let err = run(&Command::Show { position: 3 }, &mut library, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "No book at position 3.");
    }

    #[test]
    fn show_renders_details() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        let mut args = add_args("Frankenstein", "Horror");
        args.notes = Some("first edition".to_string());
        execute(&mut library, Command::Add(args));

        let output = execute(&mut library, Command::Show { position: 1 });
        assert_eq!(
            output,
            concat!(
                "Frankenstein\n",
                "By Mary Shelley\n",
                "Publication Date: 1818\n",
                "Genre: Horror\n",
                "Number of pages: 280\n",
                "Estimated reading time: 6.5\n",
                "Rating: ****\n",
                "Notes:\n",
                "first edition\n",
            )
        );
    }

    #[test]
    fn sort_genres_and_grouping_commands() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        execute(&mut library, Command::Add(add_args("Frankenstein", "Horror")));
        execute(&mut library, Command::Add(add_args("Mathilda", "Classic")));

        assert_eq!(execute(&mut library, Command::Genres), "Classic\nHorror\n");
        assert_eq!(
            execute(&mut library, Command::Sort),
            "Sorted by title (Z-A).\n"
        );
        assert_eq!(library.sort_mode(), SortMode::TitleDesc);
        assert_eq!(execute(&mut library, Command::Genres), "Horror\nClassic\n");

        assert_eq!(
            execute(&mut library, Command::Group { state: Toggle::Off }),
            "Genre grouping is off.\n"
        );
        assert!(!library.group_by_genre());
    }

    #[test]
    fn empty_library_listing() {
        let mut library = Library::load(MemoryLibraryStorage::new());
        assert_eq!(
            execute(&mut library, Command::List { flat: false }),
            "The library is empty.\n"
        );
    }
}
