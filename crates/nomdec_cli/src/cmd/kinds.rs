use nomdec::types::{Kind, Result};

/// Print the kind code table.
pub fn run(json: bool) -> Result<()> {
	if json {
		let rows: Vec<KindJson> = Kind::ALL
			.into_iter()
			.map(|kind| KindJson {
				code: kind.code(),
				name: kind.as_str(),
				class: class(kind),
				arity: kind.arity(),
			})
			.collect();
		println!("{}", serde_json::to_string_pretty(&rows)?);
		return Ok(());
	}

	println!("code  name        class");
	for kind in Kind::ALL {
		let class = match kind.arity() {
			Some(arity) => format!("{} ({arity})", class(kind)),
			None => class(kind).to_owned(),
		};
		println!("{:>4}  {:<10}  {class}", kind.code(), kind.as_str());
	}
	Ok(())
}

fn class(kind: Kind) -> &'static str {
	if kind.arity().is_some() {
		"compound"
	} else if kind.is_primitive() {
		"primitive"
	} else {
		"definition"
	}
}

#[derive(serde::Serialize)]
struct KindJson {
	code: u8,
	name: &'static str,
	class: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	arity: Option<usize>,
}
