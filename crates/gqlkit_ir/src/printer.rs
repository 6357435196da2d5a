//! SDL printing for schema documents.

use crate::ast::{
    ConstValue, Definition, Description, Directive, Document, EnumTypeDefinition,
    FieldDefinition, InputObjectTypeDefinition, InputValueDefinition, ObjectTypeDefinition,
    ObjectTypeExtension, ScalarTypeDefinition, Type, UnionTypeDefinition,
};

/// Printing options.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Number of spaces for indentation.
    pub indent_size: usize,
    /// Use tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
        }
    }
}

/// SDL printer.
pub struct Printer {
    options: PrintOptions,
    output: String,
    indent: usize,
}

impl Printer {
    /// Creates a new printer.
    #[must_use]
    pub fn new(options: PrintOptions) -> Self {
        Self {
            options,
            output: String::new(),
            indent: 0,
        }
    }

    /// Prints a document. Definitions are separated by a blank line and the
    /// output ends with a newline unless the document is empty.
    pub fn print(&mut self, document: &Document) -> String {
        self.output.clear();

        for (i, def) in document.definitions.iter().enumerate() {
            if i > 0 {
                self.output.push_str("\n\n");
            }
            self.print_definition(def);
        }
        if !document.is_empty() {
            self.output.push('\n');
        }

        std::mem::take(&mut self.output)
    }

    fn print_definition(&mut self, def: &Definition) {
        match def {
            Definition::Scalar(s) => self.print_scalar(s),
            Definition::Object(o) => self.print_object(o),
            Definition::Union(u) => self.print_union(u),
            Definition::Enum(e) => self.print_enum(e),
            Definition::InputObject(i) => self.print_input_object(i),
            Definition::ObjectExtension(x) => self.print_extension(x),
        }
    }

    fn print_scalar(&mut self, scalar: &ScalarTypeDefinition) {
        self.print_description(scalar.description.as_ref());
        self.output.push_str("scalar ");
        self.output.push_str(&scalar.name);
        self.print_directives(&scalar.directives);
    }

    fn print_object(&mut self, object: &ObjectTypeDefinition) {
        self.print_description(object.description.as_ref());
        self.output.push_str("type ");
        self.output.push_str(&object.name);
        self.print_directives(&object.directives);
        self.print_fields(&object.fields);
    }

    fn print_extension(&mut self, extension: &ObjectTypeExtension) {
        self.output.push_str("extend type ");
        self.output.push_str(&extension.name);
        self.print_fields(&extension.fields);
    }

    fn print_union(&mut self, union: &UnionTypeDefinition) {
        self.print_description(union.description.as_ref());
        self.output.push_str("union ");
        self.output.push_str(&union.name);
        self.print_directives(&union.directives);
        if !union.members.is_empty() {
            self.output.push_str(" = ");
            self.output.push_str(&union.members.join(" | "));
        }
    }

    fn print_enum(&mut self, enumeration: &EnumTypeDefinition) {
        self.print_description(enumeration.description.as_ref());
        self.output.push_str("enum ");
        self.output.push_str(&enumeration.name);
        self.print_directives(&enumeration.directives);
        if enumeration.values.is_empty() {
            return;
        }

        self.output.push_str(" {\n");
        self.indent += 1;
        for value in &enumeration.values {
            self.print_description(value.description.as_ref());
            self.push_indent();
            self.output.push_str(&value.name);
            self.print_directives(&value.directives);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.output.push('}');
    }

    fn print_input_object(&mut self, input: &InputObjectTypeDefinition) {
        self.print_description(input.description.as_ref());
        self.output.push_str("input ");
        self.output.push_str(&input.name);
        self.print_directives(&input.directives);
        if input.fields.is_empty() {
            return;
        }

        self.output.push_str(" {\n");
        self.indent += 1;
        for field in &input.fields {
            self.print_description(field.description.as_ref());
            self.push_indent();
            self.print_input_value(field);
            self.output.push('\n');
        }
        self.indent -= 1;
        self.output.push('}');
    }

    /// Prints a field block; types without fields get no braces.
    fn print_fields(&mut self, fields: &[FieldDefinition]) {
        if fields.is_empty() {
            return;
        }

        self.output.push_str(" {\n");
        self.indent += 1;
        for field in fields {
            self.print_field(field);
        }
        self.indent -= 1;
        self.output.push('}');
    }

    fn print_field(&mut self, field: &FieldDefinition) {
        self.print_description(field.description.as_ref());
        self.push_indent();
        self.output.push_str(&field.name);
        self.print_arguments(&field.arguments);
        self.output.push_str(": ");
        self.print_type(&field.ty);
        self.print_directives(&field.directives);
        self.output.push('\n');
    }

    /// Arguments go on one line unless one of them carries a description.
    fn print_arguments(&mut self, arguments: &[InputValueDefinition]) {
        if arguments.is_empty() {
            return;
        }

        self.output.push('(');
        if arguments.iter().any(|arg| arg.description.is_some()) {
            self.output.push('\n');
            self.indent += 1;
            for arg in arguments {
                self.print_description(arg.description.as_ref());
                self.push_indent();
                self.print_input_value(arg);
                self.output.push('\n');
            }
            self.indent -= 1;
            self.push_indent();
        } else {
            for (i, arg) in arguments.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.print_input_value(arg);
            }
        }
        self.output.push(')');
    }

    fn print_input_value(&mut self, value: &InputValueDefinition) {
        self.output.push_str(&value.name);
        self.output.push_str(": ");
        self.print_type(&value.ty);
        if let Some(default) = &value.default_value {
            self.output.push_str(" = ");
            self.print_value(default);
        }
        self.print_directives(&value.directives);
    }

    fn print_type(&mut self, ty: &Type) {
        match ty {
            Type::Named(name) => self.output.push_str(name),
            Type::List(inner) => {
                self.output.push('[');
                self.print_type(inner);
                self.output.push(']');
            }
            Type::NonNull(inner) => {
                self.print_type(inner);
                self.output.push('!');
            }
        }
    }

    fn print_directives(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.output.push_str(" @");
            self.output.push_str(&directive.name);
            if !directive.arguments.is_empty() {
                self.output.push('(');
                for (i, arg) in directive.arguments.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&arg.name);
                    self.output.push_str(": ");
                    self.print_value(&arg.value);
                }
                self.output.push(')');
            }
        }
    }

    fn print_value(&mut self, value: &ConstValue) {
        match value {
            ConstValue::Null => self.output.push_str("null"),
            ConstValue::Int(n) => self.output.push_str(&n.to_string()),
            // Debug formatting keeps the fractional part (`1.0`, not `1`).
            // Floats are finite here: non-finite defaults fail validation.
            ConstValue::Float(n) => self.output.push_str(&format!("{n:?}")),
            ConstValue::String(s) => self.print_string(s),
            ConstValue::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            ConstValue::Enum(name) => self.output.push_str(name),
            ConstValue::List(items) => {
                self.output.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.print_value(item);
                }
                self.output.push(']');
            }
            ConstValue::Object(fields) => {
                self.output.push('{');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.output.push_str(&field.name);
                    self.output.push_str(": ");
                    self.print_value(&field.value);
                }
                self.output.push('}');
            }
        }
    }

    fn print_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                c if c.is_control() => {
                    self.output.push_str(&format!("\\u{:04X}", u32::from(c)));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    /// Descriptions print as block strings. Multi-line text, and text ending
    /// in `"` or `\` that would run into the closing delimiter, put the
    /// delimiters on their own lines.
    fn print_description(&mut self, description: Option<&Description>) {
        let Some(desc) = description else {
            return;
        };

        let text = desc.value.replace("\"\"\"", "\\\"\"\"");
        self.push_indent();
        if text.contains('\n') || text.ends_with('"') || text.ends_with('\\') {
            self.output.push_str("\"\"\"\n");
            for line in text.lines() {
                if !line.is_empty() {
                    self.push_indent();
                    self.output.push_str(line);
                }
                self.output.push('\n');
            }
            self.push_indent();
            self.output.push_str("\"\"\"\n");
        } else {
            self.output.push_str("\"\"\"");
            self.output.push_str(&text);
            self.output.push_str("\"\"\"\n");
        }
    }

    fn push_indent(&mut self) {
        if self.options.use_tabs {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
        } else {
            for _ in 0..(self.indent * self.options.indent_size) {
                self.output.push(' ');
            }
        }
    }
}

/// Prints a document with default options.
#[must_use]
pub fn print_document(document: &Document) -> String {
    print_document_with_options(document, PrintOptions::default())
}

/// Prints a document with custom options.
#[must_use]
pub fn print_document_with_options(document: &Document, options: PrintOptions) -> String {
    let mut printer = Printer::new(options);
    printer.print(document)
}
