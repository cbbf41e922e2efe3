//! Text tree dump of a built instruction.
//!
//! ```text
//! Program: Token2022 TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb
//! └── Instruction: CloseAccount
//!     ├── Data: 09
//!     ├── Params
//!     └── Accounts
//!         ├── account [W] ...
//!         └── signers[len=0]
//! ```

use crate::instruction::{AccountMeta, Instruction};
use crate::program::program_name;

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str(&self.label);
        out.push('\n');
        self.render_children("", out);
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(prefix);
            out.push_str(branch);
            out.push_str(&child.label);
            out.push('\n');
            child.render_children(&format!("{prefix}{indent}"), out);
        }
    }
}

fn flags(meta: &AccountMeta) -> String {
    let mut s = String::with_capacity(4);
    s.push('[');
    if meta.is_writable {
        s.push('W');
    }
    if meta.is_signer {
        s.push('S');
    }
    s.push(']');
    s
}

fn account_line(label: &str, meta: &AccountMeta) -> String {
    format!("{label} {} {}", flags(meta), meta.pubkey)
}

pub(crate) fn render_instruction(
    name: &str,
    ix: &Instruction,
    params: &[(&'static str, String)],
    account_names: &[&str],
) -> String {
    let params_node = params.iter().fold(Node::new("Params"), |node, (k, v)| {
        node.child(Node::new(format!("{k}: {v}")))
    });

    let fixed = account_names.len().min(ix.accounts.len());
    let mut accounts_node = Node::new("Accounts");
    for (label, meta) in account_names.iter().zip(&ix.accounts) {
        accounts_node = accounts_node.child(Node::new(account_line(label, meta)));
    }

    // Anything past the named slots is a multisig signer.
    if account_names.len() < ix.accounts.len() || name_expects_signers(account_names) {
        let extra = &ix.accounts[fixed..];
        let signers = extra.iter().enumerate().fold(
            Node::new(format!("signers[len={}]", extra.len())),
            |node, (i, meta)| node.child(Node::new(account_line(&format!("[{i}]"), meta))),
        );
        accounts_node = accounts_node.child(signers);
    }

    let instruction = Node::new(format!("Instruction: {name}"))
        .child(Node::new(format!("Data: {}", hex::encode(&ix.data))))
        .child(params_node)
        .child(accounts_node);

    let root = Node::new(format!(
        "Program: {} {}",
        program_name(&ix.program_id),
        ix.program_id
    ))
    .child(instruction);

    let mut out = String::new();
    root.render(&mut out);
    out
}

// Owner-style instructions always show the signer branch, even when empty.
fn name_expects_signers(account_names: &[&str]) -> bool {
    account_names.contains(&"owner")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::TOKEN_2022_PROGRAM_ID;
    use crate::pubkey::Pubkey;

    fn sample() -> Instruction {
        Instruction {
            program_id: TOKEN_2022_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(Pubkey::new_from_array([1; 32]), false),
                AccountMeta::new_readonly(Pubkey::new_from_array([2; 32]), true),
            ],
            data: vec![0x14, 0x06],
        }
    }

    #[test]
    fn renders_header_and_data() {
        let out = render_instruction("Sample", &sample(), &[], &["mint", "authority"]);
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("Program: Token2022 TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb")
        );
        assert_eq!(lines.next(), Some("└── Instruction: Sample"));
        assert_eq!(lines.next(), Some("    ├── Data: 1406"));
        assert!(!out.contains("signers"));
    }

    #[test]
    fn renders_params_and_flags() {
        let out = render_instruction(
            "Sample",
            &sample(),
            &[("decimals", "6".into())],
            &["mint", "authority"],
        );

        assert!(out.contains("│   └── decimals: 6"));
        assert!(out.contains("mint [W] "));
        assert!(out.contains("authority [S] "));
    }

    #[test]
    fn extra_accounts_go_under_signers() {
        let out = render_instruction("Sample", &sample(), &[], &["mint"]);
        assert!(out.contains("signers[len=1]"));
        assert!(out.contains("[0] [S] "));
    }
}
