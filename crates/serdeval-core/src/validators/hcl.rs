//! HCL (and Terraform) check via `hcl-rs`.

use super::text;

pub(crate) fn check(data: &[u8]) -> Result<(), String> {
    ::hcl::parse(text(data)?)
        .map(drop)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_terraform() {
        let input = r#"resource "aws_instance" "example" {
  ami           = "ami-12345678"
  instance_type = "t2.micro"

  tags = {
    Name = "example"
  }
}

variable "region" {
  default = "us-east-1"
}
"#;
        assert!(check(input.as_bytes()).is_ok());
    }

    #[test]
    fn test_unclosed_block() {
        let input = "resource \"aws_instance\" \"example\" {\n  ami = \"ami-12345678\"\n";
        assert!(check(input.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_attribute_value() {
        assert!(check(b"name = \n").is_err());
    }

    #[test]
    fn test_empty_body_is_valid() {
        assert!(check(b"").is_ok());
    }
}
