//! This module contains the table rendering of the `services` command.

use comfy_table::{Cell, ContentArrangement};

/// One line of the `services` table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceRow {
    pub name: String,
    pub image: Option<String>,
    pub ports: Vec<String>,
}

/// Extension trait rendering service summaries as a table.
pub trait ServiceRowExt {
    /// Renders the rows under a `NAME  IMAGE  PORTS` header. Services without
    /// an image show `<none>`.
    fn render_table(&self) -> String;
}

impl ServiceRowExt for [ServiceRow] {
    fn render_table(&self) -> String {
        let rows = self
            .iter()
            .map(|row| {
                [
                    Cell::new(&row.name),
                    Cell::new(row.image.as_deref().unwrap_or("<none>")),
                    Cell::new(row.ports.join(", ")),
                ]
            })
            .collect::<Vec<_>>();

        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["NAME", "IMAGE", "PORTS"])
            .add_rows(rows)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_lists_every_service() {
        let rows = vec![
            ServiceRow {
                name: "web".to_string(),
                image: Some("nginx".to_string()),
                ports: vec!["8080:80".to_string(), "8443:443/tcp".to_string()],
            },
            ServiceRow { name: "worker".to_string(), image: None, ports: Vec::new() },
        ];

        let table = rows.render_table();
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("NAME") && lines[0].contains("PORTS"));
        assert!(lines[1].contains("web") && lines[1].contains("8080:80, 8443:443/tcp"));
        assert!(lines[2].contains("worker") && lines[2].contains("<none>"));
    }
}
