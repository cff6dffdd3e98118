/// Host serving the HTML rendition of RFCs. Documents live at `<host>/html/rfc<number>`.
pub const DEFAULT_RFC_HOST: &str = "https://tools.ietf.org";

pub const LOCALHOST_DOMAIN: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

// Column widths of the directory tables.
pub const MAX_CIPHER_SUITE_NAME_LENGTH: usize = 200;
pub const MAX_LONG_NAME_LENGTH: usize = 100;
pub const MAX_VULNERABILITY_NAME_LENGTH: usize = 50;
pub const MAX_VULNERABILITY_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_CVE_ID_LENGTH: usize = 100;
pub const MAX_RFC_TITLE_LENGTH: usize = 250;
