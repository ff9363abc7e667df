// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Laravel migration rendering of table schemas

use super::php::escape_single_quote_string;
use crate::ast::{ColumnDescriptor, DefaultKind, MigrationUnit};
use crate::typemap::builder_method;

/// One rendered migration, named the way Laravel expects it on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// `create_<table>_table.php`
    pub file_name: String,
    pub script: String,
}

/// Render one table's schema as an anonymous-class migration with an `up`
/// that creates the table and a `down` that drops it.
pub fn render_migration(unit: &MigrationUnit) -> MigrationFile {
    let mut script = String::from(
        "<?php\n\
         \n\
         use Illuminate\\Database\\Migrations\\Migration;\n\
         use Illuminate\\Database\\Schema\\Blueprint;\n\
         use Illuminate\\Support\\Facades\\Schema;\n\
         \n\
         return new class extends Migration\n\
         {\n\
         \x20   public function up(): void\n\
         \x20   {\n",
    );
    script.push_str(&format!(
        "        Schema::create('{}', function (Blueprint $table) {{\n",
        escape_single_quote_string(&unit.table)
    ));
    for column in &unit.columns {
        script.push_str(&format!("            {};\n", builder_call(column)));
    }
    script.push_str(&format!(
        "\n            $table->engine = '{}';\n",
        escape_single_quote_string(&unit.engine)
    ));
    script.push_str("        });\n    }\n\n");
    script.push_str(&format!(
        "    public function down(): void\n    {{\n        Schema::dropIfExists('{}');\n    }}\n",
        escape_single_quote_string(&unit.table)
    ));
    script.push_str("};\n");

    MigrationFile {
        file_name: format!("create_{}_table.php", unit.table),
        script,
    }
}

/// The `$table->...` builder chain for one column. Modifier order is fixed:
/// unsigned, nullable, default, comment.
fn builder_call(column: &ColumnDescriptor) -> String {
    let mut call = format!(
        "$table->{}('{}')",
        builder_method(&column.sql_type),
        escape_single_quote_string(&column.name)
    );
    if column.unsigned {
        call.push_str("->unsigned()");
    }
    if column.nullable {
        call.push_str("->nullable()");
    }
    match column.default_kind() {
        Some(DefaultKind::Null) => call.push_str("->default(null)"),
        Some(DefaultKind::CurrentTimestamp) => call.push_str("->useCurrent()"),
        Some(DefaultKind::Literal(literal)) => {
            call.push_str(&format!(
                "->default('{}')",
                escape_single_quote_string(literal)
            ));
        }
        None => {}
    }
    match column.comment.as_deref() {
        // an empty COMMENT '' clause renders nothing
        None | Some("") => {}
        Some(comment) => {
            call.push_str(&format!(
                "->comment('{}')",
                escape_single_quote_string(comment)
            ));
        }
    }
    call
}
