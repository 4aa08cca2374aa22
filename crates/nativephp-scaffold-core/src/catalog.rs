use crate::error::ScaffoldError;
use crate::template::{FileTemplate, TemplateRole};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// MetadataPlacement
// ---------------------------------------------------------------------------

/// Where the PHP namespace and service-provider metadata is declared.
///
/// NativePHP tooling has read it from both `nativephp.json` and the
/// `extra.nativephp` block of `composer.json`, so the choice is left to the
/// caller instead of being baked into the templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataPlacement {
    #[default]
    Manifest,
    Composer,
    Both,
}

impl MetadataPlacement {
    pub fn all() -> &'static [MetadataPlacement] {
        &[
            MetadataPlacement::Manifest,
            MetadataPlacement::Composer,
            MetadataPlacement::Both,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetadataPlacement::Manifest => "manifest",
            MetadataPlacement::Composer => "composer",
            MetadataPlacement::Both => "both",
        }
    }

    pub fn in_manifest(self) -> bool {
        matches!(self, MetadataPlacement::Manifest | MetadataPlacement::Both)
    }

    pub fn in_composer(self) -> bool {
        matches!(self, MetadataPlacement::Composer | MetadataPlacement::Both)
    }
}

impl fmt::Display for MetadataPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetadataPlacement {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manifest" => Ok(MetadataPlacement::Manifest),
            "composer" => Ok(MetadataPlacement::Composer),
            "both" => Ok(MetadataPlacement::Both),
            _ => Err(ScaffoldError::InvalidMetadataPlacement(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateSet
// ---------------------------------------------------------------------------

/// The fixed catalog of files written for every plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateSet {
    placement: MetadataPlacement,
}

impl TemplateSet {
    pub fn new(placement: MetadataPlacement) -> Self {
        Self { placement }
    }

    pub fn placement(&self) -> MetadataPlacement {
        self.placement
    }

    /// Catalog entries in write order. Every call yields the same sequence.
    pub fn entries(&self) -> Vec<FileTemplate> {
        let manifest = if self.placement.in_manifest() {
            MANIFEST_WITH_METADATA
        } else {
            MANIFEST
        };
        let composer = if self.placement.in_composer() {
            COMPOSER_WITH_METADATA
        } else {
            COMPOSER
        };

        vec![
            FileTemplate::new("nativephp.json", TemplateRole::Manifest, manifest),
            FileTemplate::new("composer.json", TemplateRole::Manifest, composer),
            FileTemplate::new(
                "src/{{namespace}}ServiceProvider.php",
                TemplateRole::Source,
                SERVICE_PROVIDER,
            ),
            FileTemplate::new("src/{{namespace}}.php", TemplateRole::Source, PLUGIN_CLASS),
            FileTemplate::new("src/Facades/{{namespace}}.php", TemplateRole::Source, FACADE),
            FileTemplate::new(
                "src/Events/{{namespace}}Completed.php",
                TemplateRole::Source,
                EVENT,
            ),
            FileTemplate::new(
                "src/Commands/{{namespace}}InstallCommand.php",
                TemplateRole::Source,
                INSTALL_COMMAND,
            ),
            FileTemplate::new(
                "resources/android/src/{{native_package_path}}/{{namespace}}Functions.kt",
                TemplateRole::NativeStub,
                KOTLIN_BRIDGE,
            ),
            FileTemplate::new(
                "resources/ios/Sources/{{namespace}}Functions.swift",
                TemplateRole::NativeStub,
                SWIFT_BRIDGE,
            ),
            FileTemplate::new(
                "resources/js/{{directory_name}}.js",
                TemplateRole::Script,
                JS_MODULE,
            ),
            FileTemplate::new("README.md", TemplateRole::Documentation, README),
            FileTemplate::new("tests/Pest.php", TemplateRole::Test, PEST_CONFIG),
            FileTemplate::new("tests/{{namespace}}Test.php", TemplateRole::Test, FEATURE_TEST),
            FileTemplate::new(".gitignore", TemplateRole::Ignore, GITIGNORE),
        ]
    }
}

// ---------------------------------------------------------------------------
// Template bodies
// ---------------------------------------------------------------------------

const MANIFEST_WITH_METADATA: &str = r#"{
    "name": "{{package_name}}",
    "version": "0.1.0",
    "namespace": "{{vendor_namespace}}\\{{namespace}}",
    "provider": "{{vendor_namespace}}\\{{namespace}}\\{{namespace}}ServiceProvider",
    "bridge_functions": [
        {
            "name": "{{namespace}}.Execute",
            "android": "{{native_package}}.{{namespace}}Functions.Execute",
            "ios": "{{namespace}}Functions.Execute",
            "description": "Run the {{title}} native action"
        }
    ],
    "events": [
        "{{vendor_namespace}}\\{{namespace}}\\Events\\{{namespace}}Completed"
    ],
    "hooks": {
        "post_install": "nativephp:{{short_name}}:install"
    },
    "android": {
        "permissions": [],
        "dependencies": {}
    },
    "ios": {
        "info_plist": {},
        "dependencies": {}
    }
}
"#;

const MANIFEST: &str = r#"{
    "name": "{{package_name}}",
    "version": "0.1.0",
    "bridge_functions": [
        {
            "name": "{{namespace}}.Execute",
            "android": "{{native_package}}.{{namespace}}Functions.Execute",
            "ios": "{{namespace}}Functions.Execute",
            "description": "Run the {{title}} native action"
        }
    ],
    "events": [
        "{{vendor_namespace}}\\{{namespace}}\\Events\\{{namespace}}Completed"
    ],
    "hooks": {
        "post_install": "nativephp:{{short_name}}:install"
    },
    "android": {
        "permissions": [],
        "dependencies": {}
    },
    "ios": {
        "info_plist": {},
        "dependencies": {}
    }
}
"#;

const COMPOSER_WITH_METADATA: &str = r#"{
    "name": "{{package_name}}",
    "description": "{{title}} plugin for NativePHP Mobile",
    "type": "nativephp-plugin",
    "license": "MIT",
    "require": {
        "php": "^8.2",
        "nativephp/mobile": "^2.0"
    },
    "require-dev": {
        "pestphp/pest": "^3.0"
    },
    "autoload": {
        "psr-4": {
            "{{vendor_namespace}}\\{{namespace}}\\": "src/"
        }
    },
    "extra": {
        "laravel": {
            "providers": [
                "{{vendor_namespace}}\\{{namespace}}\\{{namespace}}ServiceProvider"
            ]
        },
        "nativephp": {
            "manifest": "nativephp.json",
            "namespace": "{{vendor_namespace}}\\{{namespace}}",
            "provider": "{{vendor_namespace}}\\{{namespace}}\\{{namespace}}ServiceProvider"
        }
    }
}
"#;

const COMPOSER: &str = r#"{
    "name": "{{package_name}}",
    "description": "{{title}} plugin for NativePHP Mobile",
    "type": "nativephp-plugin",
    "license": "MIT",
    "require": {
        "php": "^8.2",
        "nativephp/mobile": "^2.0"
    },
    "require-dev": {
        "pestphp/pest": "^3.0"
    },
    "autoload": {
        "psr-4": {
            "{{vendor_namespace}}\\{{namespace}}\\": "src/"
        }
    },
    "extra": {
        "laravel": {
            "providers": [
                "{{vendor_namespace}}\\{{namespace}}\\{{namespace}}ServiceProvider"
            ]
        }
    }
}
"#;

const SERVICE_PROVIDER: &str = r#"<?php

namespace {{vendor_namespace}}\{{namespace}};

use Illuminate\Support\ServiceProvider;
use {{vendor_namespace}}\{{namespace}}\Commands\{{namespace}}InstallCommand;

class {{namespace}}ServiceProvider extends ServiceProvider
{
    public function register(): void
    {
        $this->app->singleton({{namespace}}::class, fn () => new {{namespace}}());
    }

    public function boot(): void
    {
        if ($this->app->runningInConsole()) {
            $this->commands([
                {{namespace}}InstallCommand::class,
            ]);
        }
    }
}
"#;

const PLUGIN_CLASS: &str = r#"<?php

namespace {{vendor_namespace}}\{{namespace}};

class {{namespace}}
{
    /**
     * Invoke the {{namespace}}.Execute bridge function.
     */
    public function execute(array $options = []): mixed
    {
        if (! function_exists('nativephp_call')) {
            return null;
        }

        $result = nativephp_call('{{namespace}}.Execute', json_encode($options));

        return $result ? json_decode($result, true) : null;
    }
}
"#;

const FACADE: &str = r#"<?php

namespace {{vendor_namespace}}\{{namespace}}\Facades;

use Illuminate\Support\Facades\Facade;

/**
 * @method static mixed execute(array $options = [])
 *
 * @see \{{vendor_namespace}}\{{namespace}}\{{namespace}}
 */
class {{namespace}} extends Facade
{
    protected static function getFacadeAccessor(): string
    {
        return \{{vendor_namespace}}\{{namespace}}\{{namespace}}::class;
    }
}
"#;

const EVENT: &str = r#"<?php

namespace {{vendor_namespace}}\{{namespace}}\Events;

use Illuminate\Foundation\Events\Dispatchable;
use Illuminate\Queue\SerializesModels;

class {{namespace}}Completed
{
    use Dispatchable, SerializesModels;

    public function __construct(
        public array $result = [],
        public ?string $id = null,
    ) {}
}
"#;

const INSTALL_COMMAND: &str = r#"<?php

namespace {{vendor_namespace}}\{{namespace}}\Commands;

use Illuminate\Console\Command;

class {{namespace}}InstallCommand extends Command
{
    protected $signature = 'nativephp:{{short_name}}:install';

    protected $description = 'Prepare the native projects for the {{title}} plugin';

    public function handle(): int
    {
        $this->info('{{title}} plugin installed.');

        return self::SUCCESS;
    }
}
"#;

const KOTLIN_BRIDGE: &str = r#"package {{native_package}}

import androidx.fragment.app.FragmentActivity
import com.nativephp.mobile.bridge.BridgeFunction
import com.nativephp.mobile.bridge.BridgeResponse

object {{namespace}}Functions {

    class Execute(private val activity: FragmentActivity) : BridgeFunction {
        override fun execute(parameters: Map<String, Any>): Map<String, Any> {
            return BridgeResponse.success(mapOf("status" to "ok"))
        }
    }
}
"#;

const SWIFT_BRIDGE: &str = r#"import Foundation

enum {{namespace}}Functions {

    class Execute: BridgeFunction {
        func execute(parameters: [String: Any]) throws -> [String: Any] {
            return BridgeResponse.success(data: ["status": "ok"])
        }
    }
}
"#;

const JS_MODULE: &str = r#"const BRIDGE_URL = '/_native/api/call';

async function call(method, params = {}) {
    const response = await fetch(BRIDGE_URL, {
        method: 'POST',
        headers: {
            'Content-Type': 'application/json',
            'X-Requested-With': 'XMLHttpRequest',
        },
        body: JSON.stringify({ method, params }),
    });

    const result = await response.json();
    if (result.status === 'error') {
        throw new Error(result.message || 'Native call failed');
    }
    return result.data;
}

export const {{camel_name}} = {
    execute: (options = {}) => call('{{namespace}}.Execute', options),
};

export default {{camel_name}};
"#;

const README: &str = r#"# {{title}}

NativePHP Mobile plugin `{{package_name}}`.

## Installation

```bash
composer require {{package_name}}
php artisan nativephp:{{short_name}}:install
```

## Usage

From PHP:

```php
use {{vendor_namespace}}\{{namespace}}\Facades\{{namespace}};

{{namespace}}::execute(['key' => 'value']);
```

From JavaScript:

```js
import { {{camel_name}} } from '../../vendor/{{package_name}}/resources/js/{{directory_name}}.js';

await {{camel_name}}.execute({ key: 'value' });
```

## Native code

| Platform | Entry point |
| -------- | ----------- |
| Android  | `{{native_package}}.{{namespace}}Functions` |
| iOS      | `{{namespace}}Functions` |

## Testing

```bash
./vendor/bin/pest
```
"#;

const PEST_CONFIG: &str = r#"<?php

expect()->extend('toBeBridgeFunctionName', function () {
    return $this->toMatch('/^[A-Z][A-Za-z0-9]*\.[A-Z][A-Za-z0-9]*$/');
});
"#;

const FEATURE_TEST: &str = r#"<?php

it('declares the {{namespace}}.Execute bridge function', function () {
    $manifest = json_decode(file_get_contents(__DIR__.'/../nativephp.json'), true);
    $names = array_column($manifest['bridge_functions'], 'name');

    expect($names)->toContain('{{namespace}}.Execute');
    expect('{{namespace}}.Execute')->toBeBridgeFunctionName();
});

it('ships both native bridge stubs', function () {
    expect(__DIR__.'/../resources/android/src/{{native_package_path}}/{{namespace}}Functions.kt')->toBeFile();
    expect(__DIR__.'/../resources/ios/Sources/{{namespace}}Functions.swift')->toBeFile();
});
"#;

const GITIGNORE: &str = r#"/vendor
/node_modules
composer.lock
.phpunit.result.cache
.DS_Store
"#;
