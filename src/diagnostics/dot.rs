use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;
use crate::core::error::{Error, ErrorKind, Result};
use crate::diagnostics::snapshot::IndexSnapshot;

/// Posting lists up to this length are drawn item by item.
pub const DEFAULT_MAX_DIRECT_ITEMS: usize = 5;

/// Renders an [`IndexSnapshot`] as a Graphviz digraph.
///
/// Layout: a stats header, a "Composite Keys" category node, one node per
/// complexity level (keys with the same member count), then one node per key.
/// Short posting lists are expanded into item nodes; longer ones collapse into
/// a single count node.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    pub max_direct_items: usize,
}

impl Default for DotRenderer {
    fn default() -> Self {
        DotRenderer {
            max_direct_items: DEFAULT_MAX_DIRECT_ITEMS,
        }
    }
}

impl DotRenderer {
    pub fn new(max_direct_items: usize) -> Self {
        DotRenderer { max_direct_items }
    }

    pub fn render(&self, snapshot: &IndexSnapshot) -> String {
        let mut out = String::new();
        out.push_str("digraph FacetIndex {\n");
        out.push_str("  rankdir=TB;\n");
        out.push_str("  splines=polyline;\n");
        out.push_str("  ranksep=0.8;\n");
        out.push_str("  nodesep=0.5;\n");
        out.push_str("  fontname=\"Arial\";\n");
        out.push_str("  node [fontname=\"Arial\", fontsize=11];\n");
        out.push_str("  edge [fontname=\"Arial\", fontsize=9, arrowsize=0.7];\n");

        out.push_str(&format!(
            "  \"stats\" [shape=plaintext, label=<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\
             <TR><TD BGCOLOR=\"#E6E6FA\"><B>Index Statistics</B></TD></TR>\
             <TR><TD ALIGN=\"left\">Total Keys: {}</TD></TR>\
             <TR><TD ALIGN=\"left\">Total Items: {}</TD></TR>\
             <TR><TD ALIGN=\"left\">Taken: {}</TD></TR></TABLE>>, fontsize=12];\n",
            snapshot.distinct_keys,
            snapshot.distinct_identities,
            snapshot.taken_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ));
        out.push_str(
            "  \"keyCategory\" [shape=plaintext, label=<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\
             <TR><TD BGCOLOR=\"#D0E0FF\"><B>Composite Keys</B></TD></TR></TABLE>>, fontsize=12];\n",
        );
        out.push_str("  \"stats\" -> \"keyCategory\" [style=invis];\n");

        let levels = snapshot.levels();
        let mut level_nodes = Vec::with_capacity(levels.len());

        for (member_count, keys) in &levels {
            let level_node = format!("keyLevel_{}", member_count);
            let label = if *member_count == 1 {
                "Simple Keys".to_string()
            } else {
                format!("{}-Facet Keys", member_count)
            };
            out.push_str(&format!(
                "  \"{}\" [shape=plaintext, label=<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\
                 <TR><TD BGCOLOR=\"#E0EFFF\">{}</TD></TR></TABLE>>, fontsize=11];\n",
                level_node, label
            ));
            out.push_str(&format!("  \"keyCategory\" -> \"{}\";\n", level_node));

            for key in keys {
                let identities = &snapshot.keys[*key].identities;
                self.render_key(&mut out, &level_node, key, identities);
            }
            level_nodes.push(level_node);
        }

        if level_nodes.len() > 1 {
            out.push_str("  { rank=same; ");
            for node in &level_nodes {
                out.push_str(&format!("\"{}\"; ", node));
            }
            out.push_str("}\n");
        }
        out.push_str("  { rank=source; \"stats\"; \"keyCategory\"; }\n");
        out.push_str("}\n");
        out
    }

    fn render_key(&self, out: &mut String, level_node: &str, key: &str, identities: &[String]) {
        let key = escape(key);
        out.push_str(&format!(
            "  \"{}\" [shape=box, style=\"rounded,filled\", fillcolor=\"#F0F8FF\", label=\"{}\\n({} items)\"];\n",
            key,
            key,
            identities.len()
        ));
        out.push_str(&format!("  \"{}\" -> \"{}\";\n", level_node, key));

        if identities.len() <= self.max_direct_items {
            for id in identities {
                let id = escape(id);
                out.push_str(&format!(
                    "  \"{}_item_{}\" [shape=ellipse, style=\"filled\", fillcolor=\"#FFE6E6\", label=\"{}\"];\n",
                    key, id, id
                ));
                out.push_str(&format!("  \"{}\" -> \"{}_item_{}\";\n", key, key, id));
            }
        } else {
            out.push_str(&format!(
                "  \"{}_items\" [shape=folder, style=\"filled\", fillcolor=\"#FFEFEF\", label=\"{} items\"];\n",
                key,
                identities.len()
            ));
            out.push_str(&format!("  \"{}\" -> \"{}_items\";\n", key, key));
        }
    }

    /// Write the DOT source to `path`.
    pub fn write_dot(&self, snapshot: &IndexSnapshot, path: &Path) -> Result<()> {
        fs::write(path, self.render(snapshot))?;
        info!(path = %path.display(), keys = snapshot.distinct_keys, "wrote index graph");
        Ok(())
    }

    /// Render to SVG at `path` through the Graphviz `dot` binary.
    pub fn render_svg(&self, snapshot: &IndexSnapshot, path: &Path) -> Result<()> {
        let mut command = Command::new("dot");
        command.arg("-Tsvg").arg("-o").arg(path);
        self.pipe_into(command, snapshot)?;
        info!(path = %path.display(), keys = snapshot.distinct_keys, "rendered index graph");
        Ok(())
    }

    /// Feed the DOT source to `command` on stdin and wait for it to exit.
    ///
    /// The child is always reaped. A non-zero exit status takes precedence
    /// over a failed write, since a renderer that quits early closes the pipe.
    fn pipe_into(&self, mut command: Command, snapshot: &IndexSnapshot) -> Result<()> {
        let program = command.get_program().to_string_lossy().into_owned();
        let mut child = command.stdin(Stdio::piped()).spawn()?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(self.render(snapshot).as_bytes())
                .map_err(Error::from),
            None => Err(Error::new(
                ErrorKind::Internal,
                format!("{} stdin was not captured", program),
            )),
        };
        // stdin is dropped by now, so the child sees end of input.

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::new(
                ErrorKind::Internal,
                format!("{} exited with {}", program, status),
            ));
        }
        written
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}
