use anyhow::{Context, Result};

use satchel_lib::grades::{gpa_band, weighted_grade, ComponentDraft, Course};

use crate::app::App;
use crate::{ComponentCommand, CoursesCommand, OutputFormat};

pub fn run(app: &App, command: CoursesCommand, format: &OutputFormat) -> Result<()> {
    match command {
        CoursesCommand::List => {
            let courses = app.grade_book.list_courses().context("Failed to list courses")?;
            print_courses(&courses, format)
        }
        CoursesCommand::Add { name } => {
            let course = app.grade_book.create_course(&name)?;
            println!("Created course '{}'", course.name);
            Ok(())
        }
        CoursesCommand::Rename { course, name } => {
            let course = app.find_course(&course)?;
            let renamed = app.grade_book.rename_course(course.id, &name)?;
            println!("Renamed course to '{}'", renamed.name);
            Ok(())
        }
        CoursesCommand::Remove { course } => {
            let course = app.find_course(&course)?;
            app.grade_book.delete_course(course.id)?;
            println!("Deleted course '{}' and its components", course.name);
            Ok(())
        }
        CoursesCommand::Search { query } => {
            let courses = app.grade_book.search(&query)?;
            print_courses(&courses, format)
        }
        CoursesCommand::Component(cmd) => run_component(app, cmd),
    }
}

fn run_component(app: &App, command: ComponentCommand) -> Result<()> {
    match command {
        ComponentCommand::Add {
            course,
            name,
            weight,
            score,
        } => {
            let course = app.find_course(&course)?;
            let draft = ComponentDraft::new(name, weight, score);
            let admitted = app.grade_book.admit(course.id, &draft)?;
            println!("Added component '{}' to '{}'", admitted.name, course.name);
            Ok(())
        }
        ComponentCommand::Edit {
            course,
            component,
            name,
            weight,
            score,
        } => {
            let course = app.find_course(&course)?;
            let existing = find_component(&course, &component)?;

            let mut draft = ComponentDraft::edit_of(existing);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(weight) = weight {
                draft.weight = weight;
            }
            if let Some(score) = score {
                draft.score = score;
            }

            let admitted = app.grade_book.admit(course.id, &draft)?;
            println!("Updated component '{}'", admitted.name);
            Ok(())
        }
        ComponentCommand::Remove { course, component } => {
            let course = app.find_course(&course)?;
            let existing = find_component(&course, &component)?;
            app.grade_book.remove_component(course.id, existing.id)?;
            println!("Removed component '{}'", existing.name);
            Ok(())
        }
    }
}

fn find_component<'a>(
    course: &'a Course,
    name: &str,
) -> Result<&'a satchel_lib::grades::Component> {
    let name_lower = name.to_lowercase();
    course
        .components
        .iter()
        .find(|c| c.name.to_lowercase() == name_lower)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No component '{}' in '{}'. Components:\n{}",
                name,
                course.name,
                course
                    .components
                    .iter()
                    .map(|c| format!("  - {}", c.name))
                    .collect::<Vec<_>>()
                    .join("\n")
            )
        })
}

fn print_courses(courses: &[Course], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = courses
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.to_string(),
                        "name": c.name,
                        "components": c.components,
                        "grade": weighted_grade(&c.components),
                        "gpaBand": gpa_band(&c.components),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if courses.is_empty() {
                println!("No courses found.");
                return Ok(());
            }

            for course in courses {
                println!(
                    "{}  |  grade {:.1}%, GPA {}/10",
                    course.name,
                    weighted_grade(&course.components),
                    gpa_band(&course.components)
                );
                for component in &course.components {
                    let score = component
                        .score
                        .map(|s| format!("{}%", s))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "    {:<24} weight {:>5}%   score {:>6}",
                        component.name, component.weight, score
                    );
                }
            }
        }
    }
    Ok(())
}
