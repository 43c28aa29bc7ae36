use super::args::{Cli, Command, PhotoCommand};
use super::render::{render_listing, render_statistics};
use anyhow::{Context, Result, anyhow, bail};
use movienotes::{MovieNotes, NoticeKind, NotesConfig, PhotoSource};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = NotesConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.data_dir(dir);
    }
    if let Some(key) = cli.key.as_deref() {
        config = config.storage_key(key);
    }

    let data_dir = config.data_dir.clone();
    let mut notes = MovieNotes::open(config)
        .with_context(|| format!("Failed to open notes in '{}'", data_dir.display()))?;

    match cli.command {
        Command::Add {
            name,
            rating_a,
            rating_b,
        } => {
            notes.cancel_edit();
            let form = notes.form_mut();
            form.name = name;
            form.rating_a = rating_a;
            form.rating_b = rating_b;
            submit(&mut notes)
        }
        Command::Edit {
            position,
            name,
            rating_a,
            rating_b,
        } => {
            if !notes.begin_edit(position) {
                bail!("No movie at position {}", position);
            }
            let form = notes.form_mut();
            form.name = name;
            form.rating_a = rating_a;
            form.rating_b = rating_b;
            submit(&mut notes)
        }
        Command::Delete { position } => {
            let name = notes.get(position).map(|movie| movie.name().to_string());
            if notes.delete(position)? {
                println!("Deleted: {}", name.unwrap_or_default());
            } else {
                println!("No movie at position {}", position);
            }
            Ok(())
        }
        Command::Photo { action } => match action {
            PhotoCommand::Add { position, files } => {
                let name = notes
                    .get(position)
                    .map(|movie| movie.name().to_string())
                    .ok_or_else(|| anyhow!("No movie at position {}", position))?;

                let mut sources = Vec::with_capacity(files.len());
                for file in &files {
                    let source = PhotoSource::from_path(file)
                        .await
                        .with_context(|| format!("Failed to read '{}'", file.display()))?;
                    sources.push(source);
                }

                let added = notes
                    .attach_photos(position, sources)
                    .await
                    .context("No photos were attached")?;
                println!("Added {} photos to {}", added, name);
                Ok(())
            }
            PhotoCommand::Remove { position, photo } => {
                if notes.remove_photo(position, photo)? {
                    println!("Removed photo {} from movie {}", photo, position);
                } else {
                    println!("No photo {} on movie {}", photo, position);
                }
                Ok(())
            }
        },
        Command::List { search } => {
            notes.set_search(search.unwrap_or_default());
            let listing = notes.listing();
            println!("{}", render_listing(&listing, notes.search(), notes.config()));
            Ok(())
        }
        Command::Stats => {
            println!("{}", render_statistics(&notes.statistics(), notes.config()));
            Ok(())
        }
    }
}

fn submit(notes: &mut MovieNotes) -> Result<()> {
    let saved = notes.submit_form()?;
    let notice = notes
        .last_notice()
        .map(|notice| (notice.text.clone(), notice.kind));

    match notice {
        Some((text, NoticeKind::Success)) if saved => {
            println!("{}", text);
            Ok(())
        }
        Some((text, _)) => bail!("{}", text),
        None => Ok(()),
    }
}
