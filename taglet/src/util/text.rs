use crate::error::{ErrorKind, Result, TagletError};

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
	let text = bytes[..end].iter().map(|c| *c as char).collect::<String>();
	text.trim_end().to_owned()
}

pub(crate) fn latin1_encode(s: &str, lossy: bool) -> Result<Vec<u8>> {
	s.chars()
		.map(|c| {
			if (c as u32) <= 255 {
				Ok(c as u8)
			} else if lossy {
				Ok(b'?')
			} else {
				Err(TagletError::new(ErrorKind::TextEncode(
					"character is not representable in Latin-1",
				)))
			}
		})
		.collect()
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(Into::into)
}

fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}
