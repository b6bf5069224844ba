// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dependency keys
//!
//! A dependency key ties a widget's sensitivity to a boolean setting:
//!
//! - `"org.cinnamon.desktop/enabled"` - sensitive while the key is true
//! - `"!org.cinnamon.desktop/enabled"` - sensitive while the key is false

use std::fmt;
use std::str::FromStr;

use gtk4::gio;
use gtk4::prelude::*;
use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{eof, opt},
    sequence::{preceded, terminated},
    IResult, Parser,
};

use crate::settings::{SettingsError, SettingsRegistry};

/// Parsed `[!]schema/key` reference
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepKey {
    pub schema: String,
    pub key: String,
    /// Widget is sensitive while the key is *false*
    pub inverted: bool,
}

fn is_name_char(c: char) -> bool {
    c != '/' && c != '!' && !c.is_whitespace()
}

fn parse_dep_key(input: &str) -> IResult<&str, (bool, &str, &str)> {
    let (input, bang) = opt(char('!')).parse(input)?;
    let (input, schema) = take_while1(is_name_char)(input)?;
    let (input, key) = terminated(preceded(char('/'), take_while1(is_name_char)), eof).parse(input)?;
    Ok((input, (bang.is_some(), schema, key)))
}

impl DepKey {
    /// Parses `"schema/key"` or `"!schema/key"`
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidDepKey`] if either part is missing or
    /// extra separators are present.
    pub fn parse(input: &str) -> Result<Self, SettingsError> {
        let (_, (inverted, schema, key)) =
            parse_dep_key(input).map_err(|_| SettingsError::InvalidDepKey(input.to_string()))?;

        Ok(Self {
            schema: schema.to_string(),
            key: key.to_string(),
            inverted,
        })
    }

    /// Binding flags: read-only, inverted when prefixed with `!`
    pub fn flags(&self) -> gio::SettingsBindFlags {
        if self.inverted {
            gio::SettingsBindFlags::GET | gio::SettingsBindFlags::INVERT_BOOLEAN
        } else {
            gio::SettingsBindFlags::GET
        }
    }

    /// Binds `widget`'s `sensitive` property to the key
    pub fn bind(
        &self,
        registry: &SettingsRegistry,
        widget: &impl IsA<gtk4::Widget>,
    ) -> Result<(), SettingsError> {
        let settings = registry.key(&self.schema, &self.key)?;
        settings
            .bind(&self.key, widget.upcast_ref::<gtk4::Widget>(), "sensitive")
            .flags(self.flags())
            .build();
        Ok(())
    }
}

impl FromStr for DepKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "!")?;
        }
        write!(f, "{}/{}", self.schema, self.key)
    }
}
